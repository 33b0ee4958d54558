//! Entity repositories.
//!
//! One repository struct per aggregate, each borrowing the pool for its
//! lifetime. Every method maps to exactly one store operation (the order
//! repository's create additionally runs a user existence pre-check) and
//! translates rows back into `storelab-core` entities.
//!
//! Result shapes follow the two-lane error design: absence is `Ok(None)` /
//! `Ok(false)`, invalidity is a typed [`RepositoryError`](crate::RepositoryError).

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
