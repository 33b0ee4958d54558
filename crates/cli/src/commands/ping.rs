//! Connectivity checks.
//!
//! # Usage
//!
//! ```bash
//! storelab ping db
//! storelab ping rpc
//! storelab ping all
//! ```
//!
//! # Environment Variables
//!
//! `DB_*` for the database check (see [`storelab_db::DbConfig`]),
//! `GRPC_HOST` / `GRPC_PORT` for the endpoint check (see
//! [`storelab_rpc::RpcConfig`]).

use storelab_db::{Database, DbConfig};
use storelab_rpc::{RpcChannels, RpcConfig};
use tracing::info;

/// Round-trip `SELECT 1` against the configured database.
///
/// # Errors
///
/// Returns an error if configuration loading, connection, or the probe
/// query fails.
pub async fn db() -> Result<(), Box<dyn std::error::Error>> {
    let config = DbConfig::from_env()?;
    let db = Database::connect(&config).await?;
    db.ping().await?;
    info!(host = %config.host, port = config.port, "PostgreSQL reachable");
    db.close().await;
    Ok(())
}

/// List one user against the configured endpoint and check the envelope.
///
/// # Errors
///
/// Returns an error if configuration loading, dialing, or the probe call
/// fails.
pub async fn rpc() -> Result<(), Box<dyn std::error::Error>> {
    let config = RpcConfig::from_env()?;
    let channels = RpcChannels::connect(&config).await?;
    channels.probe().await?;
    info!(host = %config.host, port = config.port, "gRPC endpoint reachable");
    channels.shutdown();
    Ok(())
}
