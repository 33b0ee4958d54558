//! Schema management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the four tables if they do not exist
//! storelab schema ensure
//!
//! # Drop every table (destructive)
//! storelab schema drop
//!
//! # Truncate every table and restart the id sequences
//! storelab schema wipe
//! ```
//!
//! # Environment Variables
//!
//! `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` - see
//! [`storelab_db::DbConfig`].

use storelab_db::{Database, DbConfig, schema};
use tracing::info;

async fn connect() -> Result<Database, Box<dyn std::error::Error>> {
    let config = DbConfig::from_env()?;
    Ok(Database::connect(&config).await?)
}

/// Create the tables if they do not exist. Idempotent.
///
/// # Errors
///
/// Returns an error if configuration loading or any DDL statement fails.
pub async fn ensure() -> Result<(), Box<dyn std::error::Error>> {
    let db = connect().await?;
    schema::ensure_schema(db.pool()).await?;
    info!("Schema ensured");
    db.close().await;
    Ok(())
}

/// Drop every table, cascading.
///
/// # Errors
///
/// Returns an error if configuration loading or any DDL statement fails.
pub async fn drop() -> Result<(), Box<dyn std::error::Error>> {
    let db = connect().await?;
    schema::drop_schema(db.pool()).await?;
    info!("Schema dropped");
    db.close().await;
    Ok(())
}

/// Truncate every table and restart the id sequences.
///
/// # Errors
///
/// Returns an error if configuration loading or the truncate fails.
pub async fn wipe() -> Result<(), Box<dyn std::error::Error>> {
    let db = connect().await?;
    schema::truncate_all(db.pool()).await?;
    info!("All tables truncated");
    db.close().await;
    Ok(())
}
