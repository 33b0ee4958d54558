//! Storelab Core - Shared types library.
//!
//! This crate provides the common vocabulary used across all Storelab
//! components:
//! - `db` - PostgreSQL repositories for the e-commerce schema
//! - `rpc` - gRPC clients, services, and the in-process mock server
//! - `cli` - Command-line tools for schema management and seeding
//! - `integration-tests` - The CRUD verification suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no network clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and order status
//! - [`entities`] - The four entity records plus their creation and patch shapes
//! - [`testdata`] - Collision-resistant synthetic entity factory for tests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod testdata;
pub mod types;

pub use entities::*;
pub use testdata::TestDataFactory;
pub use types::*;
