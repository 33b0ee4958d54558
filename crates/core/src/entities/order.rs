//! Order and order-item entity types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A customer order.
///
/// `order_number` is the natural key. `user_id` must reference an existing
/// user; the store enforces this with a foreign key and deletes orders in
/// cascade when the user goes away. `total_amount` is caller-supplied and
/// never derived from the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
    /// Store-assigned surrogate id.
    pub id: OrderId,
    pub user_id: UserId,
    /// Unique business identifier.
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item belonging to an order.
///
/// Deleted in cascade with its order or its product. `total_price` is
/// whatever the caller supplied; no quantity math happens at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
}

/// Payload for creating an [`OrderItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Sparse field-set for partially updating an [`Order`].
///
/// Status changes are unconditional; there is no transition gating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub total_amount: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}

impl OrderPatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_amount.is_none()
            && self.status.is_none()
            && self.shipping_address.is_none()
            && self.billing_address.is_none()
            && self.payment_method.is_none()
    }
}
