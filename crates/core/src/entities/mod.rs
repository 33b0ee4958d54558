//! Entity records for the e-commerce schema.
//!
//! Each entity comes in three shapes:
//! - the full record as the store returns it (ids and timestamps assigned
//!   by the store),
//! - a `New*` creation payload without store-assigned fields,
//! - a `*Patch` sparse field-set for partial updates, where `None` means
//!   "leave unchanged".

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserPatch};
