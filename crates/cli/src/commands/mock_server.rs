//! Run the mock gRPC server on a fixed port.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default gRPC port
//! storelab mock-server
//!
//! # Slow every response down, for client deadline testing
//! storelab mock-server --port 50099 --latency-ms 250
//! ```
//!
//! The server starts empty; seed it over the wire. State lives in memory
//! and is gone when the process exits.

use std::net::Ipv4Addr;
use std::time::Duration;

use storelab_rpc::{MockServer, MockSettings};
use tracing::info;

/// Serve until Ctrl-C, then drain and exit.
///
/// # Errors
///
/// Returns an error when the port cannot be bound or the signal handler
/// cannot be installed.
pub async fn run(port: u16, latency_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let settings = MockSettings {
        latency: (latency_ms > 0).then_some(Duration::from_millis(latency_ms)),
    };
    let server = MockServer::spawn_on(settings, (Ipv4Addr::LOCALHOST, port).into()).await?;
    info!(addr = %server.addr(), "Mock gRPC server listening; Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.shutdown().await;
    Ok(())
}
