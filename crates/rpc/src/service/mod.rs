//! Typed CRUD services over the wire clients.
//!
//! Same two-lane contract as the database repositories: absence comes back
//! as `Ok(None)` / `Ok(false)`, constraint violations and bad references
//! arrive as [`crate::RpcError::Status`] with `ALREADY_EXISTS` or
//! `FAILED_PRECONDITION`. Payloads are validated into domain types on the
//! way in; a well-formed envelope with a malformed payload is an
//! [`crate::RpcError::InvalidResponse`].

mod orders;
mod products;
mod users;

pub use orders::OrderRpcService;
pub use products::ProductRpcService;
pub use users::UserRpcService;

/// One page of a listing, with the store-side total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows in this page, in id order.
    pub items: Vec<T>,
    /// Total rows in the table, independent of the page window.
    pub total_count: i32,
}
