//! Typed unary clients over one shared [`Channel`].
//!
//! Same shape tonic's generated clients have: `ready`, then `unary` with a
//! `ProstCodec` and a static method path. Cloning a client is cheap; clones
//! multiplex over the same underlying HTTP/2 connection.

use tonic::codegen::http;
use tonic::transport::Channel;

/// Defines one unary call: readiness check, codec, static path, dispatch.
macro_rules! unary_method {
    ($name:ident, $path:literal, $req:ty, $resp:ty) => {
        pub async fn $name(
            &mut self,
            request: impl tonic::IntoRequest<$req>,
        ) -> Result<tonic::Response<$resp>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static($path);
            self.inner.unary(request.into_request(), path, codec).await
        }
    };
}

/// Typed client for `storelab.UserService`.
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl UserServiceClient {
    /// Bind a client to an established channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    unary_method!(
        create_user,
        "/storelab.UserService/CreateUser",
        super::CreateUserRequest,
        super::UserResponse
    );
    unary_method!(
        get_user,
        "/storelab.UserService/GetUser",
        super::GetUserRequest,
        super::UserResponse
    );
    unary_method!(
        get_user_by_email,
        "/storelab.UserService/GetUserByEmail",
        super::GetUserByEmailRequest,
        super::UserResponse
    );
    unary_method!(
        get_all_users,
        "/storelab.UserService/GetAllUsers",
        super::GetAllUsersRequest,
        super::UsersResponse
    );
    unary_method!(
        update_user,
        "/storelab.UserService/UpdateUser",
        super::UpdateUserRequest,
        super::UserResponse
    );
    unary_method!(
        delete_user,
        "/storelab.UserService/DeleteUser",
        super::DeleteUserRequest,
        super::DeleteResponse
    );
}

/// Typed client for `storelab.ProductService`.
#[derive(Debug, Clone)]
pub struct ProductServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl ProductServiceClient {
    /// Bind a client to an established channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    unary_method!(
        create_product,
        "/storelab.ProductService/CreateProduct",
        super::CreateProductRequest,
        super::ProductResponse
    );
    unary_method!(
        get_product,
        "/storelab.ProductService/GetProduct",
        super::GetProductRequest,
        super::ProductResponse
    );
    unary_method!(
        get_product_by_sku,
        "/storelab.ProductService/GetProductBySku",
        super::GetProductBySkuRequest,
        super::ProductResponse
    );
    unary_method!(
        get_all_products,
        "/storelab.ProductService/GetAllProducts",
        super::GetAllProductsRequest,
        super::ProductsResponse
    );
    unary_method!(
        update_product,
        "/storelab.ProductService/UpdateProduct",
        super::UpdateProductRequest,
        super::ProductResponse
    );
    unary_method!(
        delete_product,
        "/storelab.ProductService/DeleteProduct",
        super::DeleteProductRequest,
        super::DeleteResponse
    );
}

/// Typed client for `storelab.OrderService`.
#[derive(Debug, Clone)]
pub struct OrderServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl OrderServiceClient {
    /// Bind a client to an established channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    unary_method!(
        create_order,
        "/storelab.OrderService/CreateOrder",
        super::CreateOrderRequest,
        super::OrderResponse
    );
    unary_method!(
        get_order,
        "/storelab.OrderService/GetOrder",
        super::GetOrderRequest,
        super::OrderResponse
    );
    unary_method!(
        get_order_by_number,
        "/storelab.OrderService/GetOrderByNumber",
        super::GetOrderByNumberRequest,
        super::OrderResponse
    );
    unary_method!(
        get_all_orders,
        "/storelab.OrderService/GetAllOrders",
        super::GetAllOrdersRequest,
        super::OrdersResponse
    );
    unary_method!(
        update_order,
        "/storelab.OrderService/UpdateOrder",
        super::UpdateOrderRequest,
        super::OrderResponse
    );
    unary_method!(
        update_order_status,
        "/storelab.OrderService/UpdateOrderStatus",
        super::UpdateOrderStatusRequest,
        super::OrderResponse
    );
    unary_method!(
        delete_order,
        "/storelab.OrderService/DeleteOrder",
        super::DeleteOrderRequest,
        super::DeleteResponse
    );
    unary_method!(
        add_order_item,
        "/storelab.OrderService/AddOrderItem",
        super::AddOrderItemRequest,
        super::OrderItemResponse
    );
    unary_method!(
        get_order_items,
        "/storelab.OrderService/GetOrderItems",
        super::GetOrderItemsRequest,
        super::OrderItemsResponse
    );
    unary_method!(
        remove_order_item,
        "/storelab.OrderService/RemoveOrderItem",
        super::RemoveOrderItemRequest,
        super::DeleteResponse
    );
}
