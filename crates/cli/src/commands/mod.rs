//! Command implementations.

pub mod mock_server;
pub mod ping;
pub mod schema;
pub mod seed;
