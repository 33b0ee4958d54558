//! CRUD verification suite for Storelab.
//!
//! Two harnesses, one per lane:
//!
//! - [`DbTestContext`] runs repositories against a real `PostgreSQL`
//!   instance. Tests that use it are `#[ignore]`d by default; point the
//!   `DB_*` environment variables at a scratch database and run
//!   `cargo test -p storelab-integration-tests -- --ignored`.
//! - [`RpcTestContext`] spawns the in-process mock server per test, so the
//!   `rpc_*` suites are self-contained and run everywhere.
//!
//! Both hand out a [`TestDataFactory`], so concurrent tests never collide
//! on natural keys and no truncation between cases is needed. Database
//! tests delete what they create; user deletion cascades orders and items
//! away, which keeps cleanup down to a couple of calls.

use std::sync::Once;

use storelab_core::TestDataFactory;
use storelab_db::{Database, DbConfig, OrderRepository, ProductRepository, UserRepository, schema};
use storelab_rpc::{
    MockServer, MockSettings, OrderRpcService, ProductRpcService, RpcChannels, UserRpcService,
};

static INIT: Once = Once::new();

/// Install the test tracing subscriber once per process.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Harness for repository tests against a live database.
pub struct DbTestContext {
    db: Database,
    /// Collision-resistant entity factory for this test.
    pub factory: TestDataFactory,
}

impl DbTestContext {
    /// Connect from `DB_*` environment variables and ensure the schema.
    ///
    /// # Panics
    ///
    /// Panics when the configuration is invalid or the database is
    /// unreachable; the `#[ignore]` attribute on callers documents that
    /// requirement.
    pub async fn new() -> Self {
        init_tracing();
        let config = DbConfig::from_env().expect("DB_* configuration");
        let db = Database::connect(&config)
            .await
            .expect("database connection");
        schema::ensure_schema(db.pool())
            .await
            .expect("schema creation");
        Self {
            db,
            factory: TestDataFactory::new(),
        }
    }

    /// The connection handle, for transactions and direct SQL.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// User repository bound to this context's pool.
    #[must_use]
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self.db.pool())
    }

    /// Product repository bound to this context's pool.
    #[must_use]
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self.db.pool())
    }

    /// Order repository bound to this context's pool.
    #[must_use]
    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self.db.pool())
    }
}

/// Harness for RPC tests against a fresh in-process mock server.
pub struct RpcTestContext {
    server: MockServer,
    /// Channel shared by every service this harness hands out.
    pub channels: RpcChannels,
    /// Collision-resistant entity factory for this test.
    pub factory: TestDataFactory,
}

impl RpcTestContext {
    /// Spawn a mock server with default settings and connect to it.
    ///
    /// # Panics
    ///
    /// Panics when the loopback listener cannot be bound or dialed.
    pub async fn new() -> Self {
        Self::with_settings(MockSettings::default()).await
    }

    /// Spawn a mock server with explicit settings and connect to it.
    ///
    /// # Panics
    ///
    /// Panics when the loopback listener cannot be bound or dialed.
    pub async fn with_settings(settings: MockSettings) -> Self {
        init_tracing();
        let server = MockServer::spawn(settings).await.expect("mock server");
        let channels = RpcChannels::connect(&server.config())
            .await
            .expect("channel to mock server");
        Self {
            server,
            channels,
            factory: TestDataFactory::new(),
        }
    }

    /// Typed user service on this context's channel.
    #[must_use]
    pub fn users(&self) -> UserRpcService {
        UserRpcService::new(&self.channels)
    }

    /// Typed product service on this context's channel.
    #[must_use]
    pub fn products(&self) -> ProductRpcService {
        ProductRpcService::new(&self.channels)
    }

    /// Typed order service on this context's channel.
    #[must_use]
    pub fn orders(&self) -> OrderRpcService {
        OrderRpcService::new(&self.channels)
    }

    /// Tear the channel and server down.
    pub async fn shutdown(self) {
        self.channels.shutdown();
        self.server.shutdown().await;
    }
}
