//! Protobuf messages and service glue for the `storelab` package.
//!
//! Maintained by hand against `proto/storelab.proto` (the build does not run
//! protoc). Message structs carry explicit prost field attributes so the
//! wire format matches the proto file tag for tag; [`client`] and [`server`]
//! provide the unary call glue on top of tonic's public codegen surface.
//!
//! Keep this module mechanical: no conversions, no business rules. Those
//! live in [`crate::convert`] and in the mock/service layers.

// Call glue carries the error contract in the signature (tonic::Status),
// same as generated code; per-method error sections would all say the same.
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod server;

pub use client::{OrderServiceClient, ProductServiceClient, UserServiceClient};
pub use server::{
    OrderService, OrderServiceServer, ProductService, ProductServiceServer, UserService,
    UserServiceServer,
};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub username: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub password: String,
    #[prost(string, tag = "5")]
    pub first_name: String,
    #[prost(string, tag = "6")]
    pub last_name: String,
    #[prost(string, optional, tag = "7")]
    pub phone: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub address: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub city: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub country: Option<String>,
    #[prost(string, optional, tag = "11")]
    pub postal_code: Option<String>,
    #[prost(string, tag = "12")]
    pub created_at: String,
    #[prost(string, tag = "13")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Product {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub price: String,
    #[prost(string, tag = "5")]
    pub category: String,
    #[prost(string, tag = "6")]
    pub brand: String,
    #[prost(int32, tag = "7")]
    pub stock_quantity: i32,
    #[prost(string, tag = "8")]
    pub sku: String,
    #[prost(string, tag = "9")]
    pub image_url: String,
    #[prost(bool, tag = "10")]
    pub is_active: bool,
    #[prost(string, tag = "11")]
    pub created_at: String,
    #[prost(string, tag = "12")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Order {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub user_id: i32,
    #[prost(string, tag = "3")]
    pub order_number: String,
    #[prost(string, tag = "4")]
    pub total_amount: String,
    #[prost(string, tag = "5")]
    pub status: String,
    #[prost(string, tag = "6")]
    pub shipping_address: String,
    #[prost(string, tag = "7")]
    pub billing_address: String,
    #[prost(string, tag = "8")]
    pub payment_method: String,
    #[prost(string, tag = "9")]
    pub created_at: String,
    #[prost(string, tag = "10")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderItem {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub order_id: i32,
    #[prost(int32, tag = "3")]
    pub product_id: i32,
    #[prost(int32, tag = "4")]
    pub quantity: i32,
    #[prost(string, tag = "5")]
    pub unit_price: String,
    #[prost(string, tag = "6")]
    pub total_price: String,
    #[prost(string, tag = "7")]
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Shared envelopes
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
}

// ---------------------------------------------------------------------------
// UserService messages
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub password: String,
    #[prost(string, tag = "4")]
    pub first_name: String,
    #[prost(string, tag = "5")]
    pub last_name: String,
    #[prost(string, optional, tag = "6")]
    pub phone: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub address: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub city: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub country: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub postal_code: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserByEmailRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

/// `page` is 1-based; `page_size <= 0` means "no limit".
#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllUsersRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
}

/// Unset fields are left unchanged.
#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, optional, tag = "2")]
    pub username: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub email: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub password: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub first_name: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub last_name: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub phone: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub address: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub city: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub country: Option<String>,
    #[prost(string, optional, tag = "11")]
    pub postal_code: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UsersResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub users: Vec<User>,
    #[prost(int32, tag = "4")]
    pub total_count: i32,
}

// ---------------------------------------------------------------------------
// ProductService messages
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateProductRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub price: String,
    #[prost(string, tag = "4")]
    pub category: String,
    #[prost(string, tag = "5")]
    pub brand: String,
    #[prost(int32, tag = "6")]
    pub stock_quantity: i32,
    #[prost(string, tag = "7")]
    pub sku: String,
    #[prost(string, optional, tag = "8")]
    pub image_url: Option<String>,
    #[prost(bool, optional, tag = "9")]
    pub is_active: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetProductRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetProductBySkuRequest {
    #[prost(string, tag = "1")]
    pub sku: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllProductsRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateProductRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub description: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub price: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub category: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub brand: Option<String>,
    #[prost(int32, optional, tag = "7")]
    pub stock_quantity: Option<i32>,
    #[prost(string, optional, tag = "8")]
    pub sku: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub image_url: Option<String>,
    #[prost(bool, optional, tag = "10")]
    pub is_active: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteProductRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProductResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub product: Option<Product>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProductsResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub products: Vec<Product>,
    #[prost(int32, tag = "4")]
    pub total_count: i32,
}

// ---------------------------------------------------------------------------
// OrderService messages
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateOrderRequest {
    #[prost(int32, tag = "1")]
    pub user_id: i32,
    #[prost(string, tag = "2")]
    pub order_number: String,
    #[prost(string, tag = "3")]
    pub total_amount: String,
    #[prost(string, tag = "4")]
    pub status: String,
    #[prost(string, tag = "5")]
    pub shipping_address: String,
    #[prost(string, tag = "6")]
    pub billing_address: String,
    #[prost(string, tag = "7")]
    pub payment_method: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderByNumberRequest {
    #[prost(string, tag = "1")]
    pub order_number: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllOrdersRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateOrderRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, optional, tag = "2")]
    pub total_amount: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub status: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub shipping_address: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub billing_address: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub payment_method: Option<String>,
}

/// Transitions are unconditional; any status may replace any status.
#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateOrderStatusRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub status: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteOrderRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddOrderItemRequest {
    #[prost(int32, tag = "1")]
    pub order_id: i32,
    #[prost(int32, tag = "2")]
    pub product_id: i32,
    #[prost(int32, tag = "3")]
    pub quantity: i32,
    #[prost(string, tag = "4")]
    pub unit_price: String,
    #[prost(string, tag = "5")]
    pub total_price: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetOrderItemsRequest {
    #[prost(int32, tag = "1")]
    pub order_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveOrderItemRequest {
    #[prost(int32, tag = "1")]
    pub item_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub order: Option<Order>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrdersResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub orders: Vec<Order>,
    #[prost(int32, tag = "4")]
    pub total_count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderItemResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub item: Option<OrderItem>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OrderItemsResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use prost::Message as _;

    use super::*;

    #[test]
    fn test_optional_fields_survive_encoding() {
        let user = User {
            id: 7,
            username: "u".to_owned(),
            email: "u@example.com".to_owned(),
            phone: Some("+15550000000".to_owned()),
            ..User::default()
        };
        let bytes = user.encode_to_vec();
        let back = User::decode(bytes.as_slice()).unwrap();
        assert_eq!(back.phone.as_deref(), Some("+15550000000"));
        assert_eq!(back.city, None);
        assert_eq!(back, user);
    }

    #[test]
    fn test_absent_payload_decodes_as_none() {
        let resp = UserResponse {
            success: false,
            message: "user 9 not found".to_owned(),
            user: None,
        };
        let back = UserResponse::decode(resp.encode_to_vec().as_slice()).unwrap();
        assert!(!back.success);
        assert!(back.user.is_none());
    }
}
