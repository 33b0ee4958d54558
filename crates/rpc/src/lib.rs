//! Storelab RPC - gRPC channel management and typed CRUD services.
//!
//! The wire contract lives in `proto/storelab.proto` and is mirrored by
//! hand in [`pb`]. On top of it:
//!
//! - [`config`] - endpoint configuration from `GRPC_*` environment variables
//! - [`channel`] - one shared HTTP/2 channel, cached stubs, call deadlines
//! - [`convert`] - wire &lt;-&gt; domain conversions with inbound validation
//! - [`service`] - typed CRUD services mirroring the database repositories
//! - [`mock`] - a real in-process tonic server for tests, backed by an
//!   in-memory store with production-store semantics
//!
//! Absence is never an error anywhere in this crate: lookups yield
//! `Ok(None)`, deletes `Ok(false)`. Constraint violations arrive as gRPC
//! statuses (`ALREADY_EXISTS`, `FAILED_PRECONDITION`) wrapped in
//! [`RpcError::Status`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod channel;
pub mod config;
pub mod convert;
pub mod error;
pub mod mock;
pub mod pb;
pub mod service;

pub use channel::{DEFAULT_CALL_TIMEOUT, RpcChannels, execute};
pub use config::{ConfigError, RpcConfig};
pub use error::RpcError;
pub use mock::{MockServer, MockSettings, MockStore};
pub use service::{OrderRpcService, Page, ProductRpcService, UserRpcService};
