//! Pooled `PostgreSQL` connection handle.
//!
//! One [`Database`] per test process or CLI invocation; repositories borrow
//! its pool. Checkout happens per statement, so dropping a `Database` (or
//! calling [`Database::close`]) is the only lifecycle management callers do.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use crate::config::DbConfig;

/// Long-lived connection pool handle.
///
/// Cloning is cheap (the underlying pool is reference-counted) and all
/// clones share the same connections.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to `PostgreSQL` using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(config: &DbConfig) -> Result<Self, sqlx::Error> {
        let pool = create_pool(&config.database_url()).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "connected to PostgreSQL"
        );
        Ok(Self { pool })
    }

    /// The underlying pool, for repositories to borrow.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Liveness probe: round-trips `SELECT 1`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if no connection can be checked out or the
    /// statement fails.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Begin a transaction.
    ///
    /// Statements executed on the returned handle run strictly in order;
    /// commit is explicit, rollback happens on drop.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if no connection can be checked out.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Close the pool. Subsequent acquires fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
