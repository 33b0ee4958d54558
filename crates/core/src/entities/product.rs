//! Product entity types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog product.
///
/// `sku` is the natural key. `price` and `stock_quantity` are non-negative
/// by business intent, but this layer does not enforce that - it stores
/// what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned surrogate id.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub stock_quantity: i32,
    /// Unique stock-keeping unit.
    pub sku: String,
    /// Defaults to the empty string when not supplied.
    pub image_url: String,
    /// Defaults to `true` when not supplied.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub stock_quantity: i32,
    pub sku: String,
    /// `None` lets the store default to `""`.
    pub image_url: Option<String>,
    /// `None` lets the store default to `true`.
    pub is_active: Option<bool>,
}

/// Sparse field-set for partially updating a [`Product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub stock_quantity: Option<i32>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.stock_quantity.is_none()
            && self.sku.is_none()
            && self.image_url.is_none()
            && self.is_active.is_none()
    }
}
