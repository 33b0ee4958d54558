//! `PostgreSQL` layer for Storelab: pool management, schema DDL, and the
//! entity repositories.
//!
//! The crate is organized as:
//!
//! - [`config`] - `DB_*` environment configuration
//! - [`pool`] - the [`Database`] handle wrapping one `sqlx::PgPool`
//! - [`schema`] - DDL and table maintenance (ensure / drop / truncate)
//! - [`repo`] - per-entity repositories translating entities to
//!   parameterized SQL and back
//!
//! Repositories borrow the pool; every statement checks a connection out of
//! the pool for the duration of the call, so there is no held-client state
//! to reset between test cases.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod pool;
pub mod repo;
pub mod schema;

pub use config::{ConfigError, DbConfig};
pub use error::RepositoryError;
pub use pool::Database;
pub use repo::{OrderRepository, ProductRepository, UserRepository};
