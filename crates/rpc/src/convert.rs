//! Conversions between wire messages and domain types.
//!
//! Money and timestamps travel as strings on the wire; inbound values are
//! validated here and surface as [`RpcError::InvalidResponse`] when they do
//! not parse. Outbound request builders are infallible: domain types are
//! already well-formed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use storelab_core::{
    Email, NewOrder, NewOrderItem, NewProduct, NewUser, Order, OrderId, OrderItem, OrderItemId,
    OrderPatch, OrderStatus, Product, ProductId, ProductPatch, User, UserId, UserPatch,
};

use crate::error::RpcError;
use crate::pb;

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, RpcError> {
    value
        .parse::<Decimal>()
        .map_err(|e| RpcError::InvalidResponse(format!("field {field} is not a decimal: {e}")))
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, RpcError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RpcError::InvalidResponse(format!("field {field} is not RFC 3339: {e}")))
}

fn parse_status(value: &str) -> Result<OrderStatus, RpcError> {
    value
        .parse::<OrderStatus>()
        .map_err(|e| RpcError::InvalidResponse(e.to_string()))
}

fn parse_email(value: &str) -> Result<Email, RpcError> {
    Email::parse(value)
        .map_err(|e| RpcError::InvalidResponse(format!("field email is invalid: {e}")))
}

// ---------------------------------------------------------------------------
// Wire -> domain
// ---------------------------------------------------------------------------

impl TryFrom<pb::User> for User {
    type Error = RpcError;

    fn try_from(wire: pb::User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(wire.id),
            email: parse_email(&wire.email)?,
            created_at: parse_timestamp("created_at", &wire.created_at)?,
            updated_at: parse_timestamp("updated_at", &wire.updated_at)?,
            username: wire.username,
            password: wire.password,
            first_name: wire.first_name,
            last_name: wire.last_name,
            phone: wire.phone,
            address: wire.address,
            city: wire.city,
            country: wire.country,
            postal_code: wire.postal_code,
        })
    }
}

impl TryFrom<pb::Product> for Product {
    type Error = RpcError;

    fn try_from(wire: pb::Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(wire.id),
            price: parse_decimal("price", &wire.price)?,
            created_at: parse_timestamp("created_at", &wire.created_at)?,
            updated_at: parse_timestamp("updated_at", &wire.updated_at)?,
            name: wire.name,
            description: wire.description,
            category: wire.category,
            brand: wire.brand,
            stock_quantity: wire.stock_quantity,
            sku: wire.sku,
            image_url: wire.image_url,
            is_active: wire.is_active,
        })
    }
}

impl TryFrom<pb::Order> for Order {
    type Error = RpcError;

    fn try_from(wire: pb::Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(wire.id),
            user_id: UserId::new(wire.user_id),
            total_amount: parse_decimal("total_amount", &wire.total_amount)?,
            status: parse_status(&wire.status)?,
            created_at: parse_timestamp("created_at", &wire.created_at)?,
            updated_at: parse_timestamp("updated_at", &wire.updated_at)?,
            order_number: wire.order_number,
            shipping_address: wire.shipping_address,
            billing_address: wire.billing_address,
            payment_method: wire.payment_method,
        })
    }
}

impl TryFrom<pb::OrderItem> for OrderItem {
    type Error = RpcError;

    fn try_from(wire: pb::OrderItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderItemId::new(wire.id),
            order_id: OrderId::new(wire.order_id),
            product_id: ProductId::new(wire.product_id),
            quantity: wire.quantity,
            unit_price: parse_decimal("unit_price", &wire.unit_price)?,
            total_price: parse_decimal("total_price", &wire.total_price)?,
            created_at: parse_timestamp("created_at", &wire.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Domain -> wire
// ---------------------------------------------------------------------------

/// Build the wire request for creating a user.
#[must_use]
pub fn create_user_request(new: &NewUser) -> pb::CreateUserRequest {
    pb::CreateUserRequest {
        username: new.username.clone(),
        email: new.email.as_str().to_owned(),
        password: new.password.clone(),
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        phone: new.phone.clone(),
        address: new.address.clone(),
        city: new.city.clone(),
        country: new.country.clone(),
        postal_code: new.postal_code.clone(),
    }
}

/// Build the wire request for a sparse user update.
#[must_use]
pub fn update_user_request(id: UserId, patch: &UserPatch) -> pb::UpdateUserRequest {
    pb::UpdateUserRequest {
        id: id.as_i32(),
        username: patch.username.clone(),
        email: patch.email.as_ref().map(|e| e.as_str().to_owned()),
        password: patch.password.clone(),
        first_name: patch.first_name.clone(),
        last_name: patch.last_name.clone(),
        phone: patch.phone.clone(),
        address: patch.address.clone(),
        city: patch.city.clone(),
        country: patch.country.clone(),
        postal_code: patch.postal_code.clone(),
    }
}

/// Build the wire request for creating a product.
#[must_use]
pub fn create_product_request(new: &NewProduct) -> pb::CreateProductRequest {
    pb::CreateProductRequest {
        name: new.name.clone(),
        description: new.description.clone(),
        price: new.price.to_string(),
        category: new.category.clone(),
        brand: new.brand.clone(),
        stock_quantity: new.stock_quantity,
        sku: new.sku.clone(),
        image_url: new.image_url.clone(),
        is_active: new.is_active,
    }
}

/// Build the wire request for a sparse product update.
#[must_use]
pub fn update_product_request(id: ProductId, patch: &ProductPatch) -> pb::UpdateProductRequest {
    pb::UpdateProductRequest {
        id: id.as_i32(),
        name: patch.name.clone(),
        description: patch.description.clone(),
        price: patch.price.map(|d| d.to_string()),
        category: patch.category.clone(),
        brand: patch.brand.clone(),
        stock_quantity: patch.stock_quantity,
        sku: patch.sku.clone(),
        image_url: patch.image_url.clone(),
        is_active: patch.is_active,
    }
}

/// Build the wire request for creating an order.
#[must_use]
pub fn create_order_request(new: &NewOrder) -> pb::CreateOrderRequest {
    pb::CreateOrderRequest {
        user_id: new.user_id.as_i32(),
        order_number: new.order_number.clone(),
        total_amount: new.total_amount.to_string(),
        status: new.status.as_str().to_owned(),
        shipping_address: new.shipping_address.clone(),
        billing_address: new.billing_address.clone(),
        payment_method: new.payment_method.clone(),
    }
}

/// Build the wire request for a sparse order update.
#[must_use]
pub fn update_order_request(id: OrderId, patch: &OrderPatch) -> pb::UpdateOrderRequest {
    pb::UpdateOrderRequest {
        id: id.as_i32(),
        total_amount: patch.total_amount.map(|d| d.to_string()),
        status: patch.status.map(|s| s.as_str().to_owned()),
        shipping_address: patch.shipping_address.clone(),
        billing_address: patch.billing_address.clone(),
        payment_method: patch.payment_method.clone(),
    }
}

/// Build the wire request for attaching an item to an order.
#[must_use]
pub fn add_order_item_request(order_id: OrderId, new: &NewOrderItem) -> pb::AddOrderItemRequest {
    pb::AddOrderItemRequest {
        order_id: order_id.as_i32(),
        product_id: new.product_id.as_i32(),
        quantity: new.quantity,
        unit_price: new.unit_price.to_string(),
        total_price: new.total_price.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire_user() -> pb::User {
        pb::User {
            id: 3,
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "pw".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            phone: Some("+15550000001".to_owned()),
            address: None,
            city: Some("London".to_owned()),
            country: None,
            postal_code: None,
            created_at: "2026-08-23T10:00:00+00:00".to_owned(),
            updated_at: "2026-08-23T10:05:00Z".to_owned(),
        }
    }

    #[test]
    fn test_user_from_wire() {
        let user = User::try_from(wire_user()).unwrap();
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert_eq!(user.phone.as_deref(), Some("+15550000001"));
        assert!(user.address.is_none());
        assert_eq!(user.updated_at.to_rfc3339(), "2026-08-23T10:05:00+00:00");
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut wire = wire_user();
        wire.created_at = "yesterday".to_owned();
        let err = User::try_from(wire).unwrap_err();
        assert!(matches!(err, RpcError::InvalidResponse(_)));
        assert!(err.to_string().contains("created_at"));
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let wire = pb::Product {
            id: 1,
            price: "nine dollars".to_owned(),
            created_at: "2026-08-23T10:00:00Z".to_owned(),
            updated_at: "2026-08-23T10:00:00Z".to_owned(),
            ..pb::Product::default()
        };
        let err = Product::try_from(wire).unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_bad_status_is_rejected() {
        let wire = pb::Order {
            id: 1,
            user_id: 1,
            total_amount: "10.00".to_owned(),
            status: "teleported".to_owned(),
            created_at: "2026-08-23T10:00:00Z".to_owned(),
            updated_at: "2026-08-23T10:00:00Z".to_owned(),
            ..pb::Order::default()
        };
        let err = Order::try_from(wire).unwrap_err();
        assert!(err.to_string().contains("teleported"));
    }

    #[test]
    fn test_legacy_status_spelling_accepted() {
        let wire = pb::Order {
            id: 1,
            user_id: 1,
            total_amount: "10.00".to_owned(),
            status: "confirmed".to_owned(),
            created_at: "2026-08-23T10:00:00Z".to_owned(),
            updated_at: "2026-08-23T10:00:00Z".to_owned(),
            ..pb::Order::default()
        };
        let order = Order::try_from(wire).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn test_update_request_carries_only_patched_fields() {
        let patch = UserPatch {
            first_name: Some("Grace".to_owned()),
            ..UserPatch::default()
        };
        let request = update_user_request(UserId::new(9), &patch);
        assert_eq!(request.id, 9);
        assert_eq!(request.first_name.as_deref(), Some("Grace"));
        assert!(request.username.is_none());
        assert!(request.email.is_none());
    }

    #[test]
    fn test_order_update_serializes_money_and_status() {
        let patch = OrderPatch {
            total_amount: Some(Decimal::new(12345, 2)),
            status: Some(OrderStatus::Shipped),
            ..OrderPatch::default()
        };
        let request = update_order_request(OrderId::new(4), &patch);
        assert_eq!(request.total_amount.as_deref(), Some("123.45"));
        assert_eq!(request.status.as_deref(), Some("shipped"));
        assert!(request.shipping_address.is_none());
    }
}
