//! Server-side glue: handler traits plus tower services routing unary calls.
//!
//! Mirrors the shape tonic's generated servers have. Each `*Server<T>` is a
//! `tower::Service` over HTTP/2 request paths; matched methods decode through
//! a `ProstCodec` and dispatch to the handler trait, unmatched paths answer
//! grpc-status 12 (UNIMPLEMENTED).

use std::sync::Arc;

use tonic::body::BoxBody;
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError, empty_body, http};
use tonic::server::{NamedService, UnaryService};

// ---------------------------------------------------------------------------
// Handler traits
// ---------------------------------------------------------------------------

/// Handler trait for `storelab.UserService`.
#[tonic::async_trait]
pub trait UserService: Send + Sync + 'static {
    async fn create_user(
        &self,
        request: tonic::Request<super::CreateUserRequest>,
    ) -> Result<tonic::Response<super::UserResponse>, tonic::Status>;

    async fn get_user(
        &self,
        request: tonic::Request<super::GetUserRequest>,
    ) -> Result<tonic::Response<super::UserResponse>, tonic::Status>;

    async fn get_user_by_email(
        &self,
        request: tonic::Request<super::GetUserByEmailRequest>,
    ) -> Result<tonic::Response<super::UserResponse>, tonic::Status>;

    async fn get_all_users(
        &self,
        request: tonic::Request<super::GetAllUsersRequest>,
    ) -> Result<tonic::Response<super::UsersResponse>, tonic::Status>;

    async fn update_user(
        &self,
        request: tonic::Request<super::UpdateUserRequest>,
    ) -> Result<tonic::Response<super::UserResponse>, tonic::Status>;

    async fn delete_user(
        &self,
        request: tonic::Request<super::DeleteUserRequest>,
    ) -> Result<tonic::Response<super::DeleteResponse>, tonic::Status>;
}

/// Handler trait for `storelab.ProductService`.
#[tonic::async_trait]
pub trait ProductService: Send + Sync + 'static {
    async fn create_product(
        &self,
        request: tonic::Request<super::CreateProductRequest>,
    ) -> Result<tonic::Response<super::ProductResponse>, tonic::Status>;

    async fn get_product(
        &self,
        request: tonic::Request<super::GetProductRequest>,
    ) -> Result<tonic::Response<super::ProductResponse>, tonic::Status>;

    async fn get_product_by_sku(
        &self,
        request: tonic::Request<super::GetProductBySkuRequest>,
    ) -> Result<tonic::Response<super::ProductResponse>, tonic::Status>;

    async fn get_all_products(
        &self,
        request: tonic::Request<super::GetAllProductsRequest>,
    ) -> Result<tonic::Response<super::ProductsResponse>, tonic::Status>;

    async fn update_product(
        &self,
        request: tonic::Request<super::UpdateProductRequest>,
    ) -> Result<tonic::Response<super::ProductResponse>, tonic::Status>;

    async fn delete_product(
        &self,
        request: tonic::Request<super::DeleteProductRequest>,
    ) -> Result<tonic::Response<super::DeleteResponse>, tonic::Status>;
}

/// Handler trait for `storelab.OrderService`.
#[tonic::async_trait]
pub trait OrderService: Send + Sync + 'static {
    async fn create_order(
        &self,
        request: tonic::Request<super::CreateOrderRequest>,
    ) -> Result<tonic::Response<super::OrderResponse>, tonic::Status>;

    async fn get_order(
        &self,
        request: tonic::Request<super::GetOrderRequest>,
    ) -> Result<tonic::Response<super::OrderResponse>, tonic::Status>;

    async fn get_order_by_number(
        &self,
        request: tonic::Request<super::GetOrderByNumberRequest>,
    ) -> Result<tonic::Response<super::OrderResponse>, tonic::Status>;

    async fn get_all_orders(
        &self,
        request: tonic::Request<super::GetAllOrdersRequest>,
    ) -> Result<tonic::Response<super::OrdersResponse>, tonic::Status>;

    async fn update_order(
        &self,
        request: tonic::Request<super::UpdateOrderRequest>,
    ) -> Result<tonic::Response<super::OrderResponse>, tonic::Status>;

    async fn update_order_status(
        &self,
        request: tonic::Request<super::UpdateOrderStatusRequest>,
    ) -> Result<tonic::Response<super::OrderResponse>, tonic::Status>;

    async fn delete_order(
        &self,
        request: tonic::Request<super::DeleteOrderRequest>,
    ) -> Result<tonic::Response<super::DeleteResponse>, tonic::Status>;

    async fn add_order_item(
        &self,
        request: tonic::Request<super::AddOrderItemRequest>,
    ) -> Result<tonic::Response<super::OrderItemResponse>, tonic::Status>;

    async fn get_order_items(
        &self,
        request: tonic::Request<super::GetOrderItemsRequest>,
    ) -> Result<tonic::Response<super::OrderItemsResponse>, tonic::Status>;

    async fn remove_order_item(
        &self,
        request: tonic::Request<super::RemoveOrderItemRequest>,
    ) -> Result<tonic::Response<super::DeleteResponse>, tonic::Status>;
}

// ---------------------------------------------------------------------------
// Unary plumbing
// ---------------------------------------------------------------------------

/// One handler method of `S`, monomorphized per request/response pair.
///
/// Handlers are plain fn pointers (the dispatch closures capture nothing),
/// which keeps every method arm down to a single adapter type.
type Handler<S, Req, Resp> =
    fn(Arc<S>, tonic::Request<Req>) -> BoxFuture<tonic::Response<Resp>, tonic::Status>;

struct MethodSvc<S, Req, Resp> {
    inner: Arc<S>,
    handler: Handler<S, Req, Resp>,
}

impl<S, Req, Resp> UnaryService<Req> for MethodSvc<S, Req, Resp>
where
    S: Send + Sync + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
{
    type Response = Resp;
    type Future = BoxFuture<tonic::Response<Resp>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<Req>) -> Self::Future {
        (self.handler)(Arc::clone(&self.inner), request)
    }
}

/// Decode `req` as `Req`, run the handler, encode the response.
fn unary<S, Req, Resp, B>(
    inner: Arc<S>,
    handler: Handler<S, Req, Resp>,
    req: http::Request<B>,
) -> BoxFuture<http::Response<BoxBody>, std::convert::Infallible>
where
    S: Send + Sync + 'static,
    Req: prost::Message + Default + 'static,
    Resp: prost::Message + Default + 'static,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    Box::pin(async move {
        let method = MethodSvc { inner, handler };
        let codec = tonic::codec::ProstCodec::default();
        let mut grpc = tonic::server::Grpc::new(codec);
        Ok(grpc.unary(method, req).await)
    })
}

fn unimplemented_response() -> http::Response<BoxBody> {
    let mut response = http::Response::new(empty_body());
    response
        .headers_mut()
        .insert("grpc-status", http::HeaderValue::from_static("12"));
    response
        .headers_mut()
        .insert("content-type", http::HeaderValue::from_static("application/grpc"));
    response
}

// ---------------------------------------------------------------------------
// UserServiceServer
// ---------------------------------------------------------------------------

/// Routes `storelab.UserService` calls to a handler `T`.
#[derive(Debug)]
pub struct UserServiceServer<T> {
    inner: Arc<T>,
}

impl<T: UserService> UserServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for UserServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: UserService, B> Service<http::Request<B>> for UserServiceServer<T>
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            "/storelab.UserService/CreateUser" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.create_user(r).await }),
                req,
            ),
            "/storelab.UserService/GetUser" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_user(r).await }),
                req,
            ),
            "/storelab.UserService/GetUserByEmail" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_user_by_email(r).await }),
                req,
            ),
            "/storelab.UserService/GetAllUsers" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_all_users(r).await }),
                req,
            ),
            "/storelab.UserService/UpdateUser" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.update_user(r).await }),
                req,
            ),
            "/storelab.UserService/DeleteUser" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.delete_user(r).await }),
                req,
            ),
            _ => Box::pin(async move { Ok(unimplemented_response()) }),
        }
    }
}

impl<T: UserService> NamedService for UserServiceServer<T> {
    const NAME: &'static str = "storelab.UserService";
}

// ---------------------------------------------------------------------------
// ProductServiceServer
// ---------------------------------------------------------------------------

/// Routes `storelab.ProductService` calls to a handler `T`.
#[derive(Debug)]
pub struct ProductServiceServer<T> {
    inner: Arc<T>,
}

impl<T: ProductService> ProductServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for ProductServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ProductService, B> Service<http::Request<B>> for ProductServiceServer<T>
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            "/storelab.ProductService/CreateProduct" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.create_product(r).await }),
                req,
            ),
            "/storelab.ProductService/GetProduct" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_product(r).await }),
                req,
            ),
            "/storelab.ProductService/GetProductBySku" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_product_by_sku(r).await }),
                req,
            ),
            "/storelab.ProductService/GetAllProducts" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_all_products(r).await }),
                req,
            ),
            "/storelab.ProductService/UpdateProduct" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.update_product(r).await }),
                req,
            ),
            "/storelab.ProductService/DeleteProduct" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.delete_product(r).await }),
                req,
            ),
            _ => Box::pin(async move { Ok(unimplemented_response()) }),
        }
    }
}

impl<T: ProductService> NamedService for ProductServiceServer<T> {
    const NAME: &'static str = "storelab.ProductService";
}

// ---------------------------------------------------------------------------
// OrderServiceServer
// ---------------------------------------------------------------------------

/// Routes `storelab.OrderService` calls to a handler `T`.
#[derive(Debug)]
pub struct OrderServiceServer<T> {
    inner: Arc<T>,
}

impl<T: OrderService> OrderServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for OrderServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: OrderService, B> Service<http::Request<B>> for OrderServiceServer<T>
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            "/storelab.OrderService/CreateOrder" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.create_order(r).await }),
                req,
            ),
            "/storelab.OrderService/GetOrder" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_order(r).await }),
                req,
            ),
            "/storelab.OrderService/GetOrderByNumber" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_order_by_number(r).await }),
                req,
            ),
            "/storelab.OrderService/GetAllOrders" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_all_orders(r).await }),
                req,
            ),
            "/storelab.OrderService/UpdateOrder" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.update_order(r).await }),
                req,
            ),
            "/storelab.OrderService/UpdateOrderStatus" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.update_order_status(r).await }),
                req,
            ),
            "/storelab.OrderService/DeleteOrder" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.delete_order(r).await }),
                req,
            ),
            "/storelab.OrderService/AddOrderItem" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.add_order_item(r).await }),
                req,
            ),
            "/storelab.OrderService/GetOrderItems" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.get_order_items(r).await }),
                req,
            ),
            "/storelab.OrderService/RemoveOrderItem" => unary(
                inner,
                |svc: Arc<T>, r| Box::pin(async move { svc.remove_order_item(r).await }),
                req,
            ),
            _ => Box::pin(async move { Ok(unimplemented_response()) }),
        }
    }
}

impl<T: OrderService> NamedService for OrderServiceServer<T> {
    const NAME: &'static str = "storelab.OrderService";
}
