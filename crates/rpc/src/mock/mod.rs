//! In-process mock gRPC server.
//!
//! A real tonic server on a loopback port backed by [`store::MockStore`],
//! not a canned-response stub: natural-key conflicts, foreign-key checks,
//! cascading deletes, and pagination all behave like the production store.
//! Tests spawn one per case and talk to it over a real channel.

pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use crate::config::RpcConfig;
use crate::pb;
use crate::pb::{OrderServiceServer, ProductServiceServer, UserServiceServer};

pub use store::MockStore;

/// Tuning knobs for the mock server.
#[derive(Debug, Clone, Default)]
pub struct MockSettings {
    /// Artificial delay applied before every response, for deadline tests.
    pub latency: Option<Duration>,
}

impl MockSettings {
    async fn simulate(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn user_envelope(user: Option<pb::User>, missing: String) -> pb::UserResponse {
    user.map_or(
        pb::UserResponse {
            success: false,
            message: missing,
            user: None,
        },
        |user| pb::UserResponse {
            success: true,
            message: String::new(),
            user: Some(user),
        },
    )
}

fn product_envelope(product: Option<pb::Product>, missing: String) -> pb::ProductResponse {
    product.map_or(
        pb::ProductResponse {
            success: false,
            message: missing,
            product: None,
        },
        |product| pb::ProductResponse {
            success: true,
            message: String::new(),
            product: Some(product),
        },
    )
}

fn order_envelope(order: Option<pb::Order>, missing: String) -> pb::OrderResponse {
    order.map_or(
        pb::OrderResponse {
            success: false,
            message: missing,
            order: None,
        },
        |order| pb::OrderResponse {
            success: true,
            message: String::new(),
            order: Some(order),
        },
    )
}

fn delete_envelope(deleted: bool, entity: &str, id: i32) -> pb::DeleteResponse {
    if deleted {
        pb::DeleteResponse {
            success: true,
            message: format!("{entity} deleted"),
        }
    } else {
        pb::DeleteResponse {
            success: false,
            message: format!("{entity} {id} not found"),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct MockUserService {
    store: Arc<MockStore>,
    settings: MockSettings,
}

#[tonic::async_trait]
impl pb::UserService for MockUserService {
    async fn create_user(
        &self,
        request: Request<pb::CreateUserRequest>,
    ) -> Result<Response<pb::UserResponse>, Status> {
        self.settings.simulate().await;
        let user = self.store.create_user(request.into_inner())?;
        Ok(Response::new(pb::UserResponse {
            success: true,
            message: "user created".to_owned(),
            user: Some(user),
        }))
    }

    async fn get_user(
        &self,
        request: Request<pb::GetUserRequest>,
    ) -> Result<Response<pb::UserResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(user_envelope(
            self.store.get_user(id),
            format!("user {id} not found"),
        )))
    }

    async fn get_user_by_email(
        &self,
        request: Request<pb::GetUserByEmailRequest>,
    ) -> Result<Response<pb::UserResponse>, Status> {
        self.settings.simulate().await;
        let email = request.into_inner().email;
        Ok(Response::new(user_envelope(
            self.store.get_user_by_email(&email),
            format!("user with email {email} not found"),
        )))
    }

    async fn get_all_users(
        &self,
        request: Request<pb::GetAllUsersRequest>,
    ) -> Result<Response<pb::UsersResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let (users, total_count) = self.store.list_users(req.page, req.page_size);
        Ok(Response::new(pb::UsersResponse {
            success: true,
            message: String::new(),
            users,
            total_count,
        }))
    }

    async fn update_user(
        &self,
        request: Request<pb::UpdateUserRequest>,
    ) -> Result<Response<pb::UserResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let id = req.id;
        Ok(Response::new(user_envelope(
            self.store.update_user(req)?,
            format!("user {id} not found"),
        )))
    }

    async fn delete_user(
        &self,
        request: Request<pb::DeleteUserRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(delete_envelope(
            self.store.delete_user(id),
            "user",
            id,
        )))
    }
}

#[derive(Debug, Clone)]
struct MockProductService {
    store: Arc<MockStore>,
    settings: MockSettings,
}

#[tonic::async_trait]
impl pb::ProductService for MockProductService {
    async fn create_product(
        &self,
        request: Request<pb::CreateProductRequest>,
    ) -> Result<Response<pb::ProductResponse>, Status> {
        self.settings.simulate().await;
        let product = self.store.create_product(request.into_inner())?;
        Ok(Response::new(pb::ProductResponse {
            success: true,
            message: "product created".to_owned(),
            product: Some(product),
        }))
    }

    async fn get_product(
        &self,
        request: Request<pb::GetProductRequest>,
    ) -> Result<Response<pb::ProductResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(product_envelope(
            self.store.get_product(id),
            format!("product {id} not found"),
        )))
    }

    async fn get_product_by_sku(
        &self,
        request: Request<pb::GetProductBySkuRequest>,
    ) -> Result<Response<pb::ProductResponse>, Status> {
        self.settings.simulate().await;
        let sku = request.into_inner().sku;
        Ok(Response::new(product_envelope(
            self.store.get_product_by_sku(&sku),
            format!("product with sku {sku} not found"),
        )))
    }

    async fn get_all_products(
        &self,
        request: Request<pb::GetAllProductsRequest>,
    ) -> Result<Response<pb::ProductsResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let (products, total_count) = self.store.list_products(req.page, req.page_size);
        Ok(Response::new(pb::ProductsResponse {
            success: true,
            message: String::new(),
            products,
            total_count,
        }))
    }

    async fn update_product(
        &self,
        request: Request<pb::UpdateProductRequest>,
    ) -> Result<Response<pb::ProductResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let id = req.id;
        Ok(Response::new(product_envelope(
            self.store.update_product(req)?,
            format!("product {id} not found"),
        )))
    }

    async fn delete_product(
        &self,
        request: Request<pb::DeleteProductRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(delete_envelope(
            self.store.delete_product(id),
            "product",
            id,
        )))
    }
}

#[derive(Debug, Clone)]
struct MockOrderService {
    store: Arc<MockStore>,
    settings: MockSettings,
}

#[tonic::async_trait]
impl pb::OrderService for MockOrderService {
    async fn create_order(
        &self,
        request: Request<pb::CreateOrderRequest>,
    ) -> Result<Response<pb::OrderResponse>, Status> {
        self.settings.simulate().await;
        let order = self.store.create_order(request.into_inner())?;
        Ok(Response::new(pb::OrderResponse {
            success: true,
            message: "order created".to_owned(),
            order: Some(order),
        }))
    }

    async fn get_order(
        &self,
        request: Request<pb::GetOrderRequest>,
    ) -> Result<Response<pb::OrderResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(order_envelope(
            self.store.get_order(id),
            format!("order {id} not found"),
        )))
    }

    async fn get_order_by_number(
        &self,
        request: Request<pb::GetOrderByNumberRequest>,
    ) -> Result<Response<pb::OrderResponse>, Status> {
        self.settings.simulate().await;
        let order_number = request.into_inner().order_number;
        Ok(Response::new(order_envelope(
            self.store.get_order_by_number(&order_number),
            format!("order {order_number} not found"),
        )))
    }

    async fn get_all_orders(
        &self,
        request: Request<pb::GetAllOrdersRequest>,
    ) -> Result<Response<pb::OrdersResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let (orders, total_count) = self.store.list_orders(req.page, req.page_size);
        Ok(Response::new(pb::OrdersResponse {
            success: true,
            message: String::new(),
            orders,
            total_count,
        }))
    }

    async fn update_order(
        &self,
        request: Request<pb::UpdateOrderRequest>,
    ) -> Result<Response<pb::OrderResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        let id = req.id;
        Ok(Response::new(order_envelope(
            self.store.update_order(req)?,
            format!("order {id} not found"),
        )))
    }

    async fn update_order_status(
        &self,
        request: Request<pb::UpdateOrderStatusRequest>,
    ) -> Result<Response<pb::OrderResponse>, Status> {
        self.settings.simulate().await;
        let req = request.into_inner();
        Ok(Response::new(order_envelope(
            self.store.update_order_status(req.id, &req.status)?,
            format!("order {} not found", req.id),
        )))
    }

    async fn delete_order(
        &self,
        request: Request<pb::DeleteOrderRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.settings.simulate().await;
        let id = request.into_inner().id;
        Ok(Response::new(delete_envelope(
            self.store.delete_order(id),
            "order",
            id,
        )))
    }

    async fn add_order_item(
        &self,
        request: Request<pb::AddOrderItemRequest>,
    ) -> Result<Response<pb::OrderItemResponse>, Status> {
        self.settings.simulate().await;
        let item = self.store.add_item(request.into_inner())?;
        Ok(Response::new(pb::OrderItemResponse {
            success: true,
            message: "item added".to_owned(),
            item: Some(item),
        }))
    }

    async fn get_order_items(
        &self,
        request: Request<pb::GetOrderItemsRequest>,
    ) -> Result<Response<pb::OrderItemsResponse>, Status> {
        self.settings.simulate().await;
        let order_id = request.into_inner().order_id;
        Ok(Response::new(pb::OrderItemsResponse {
            success: true,
            message: String::new(),
            items: self.store.items_for_order(order_id),
        }))
    }

    async fn remove_order_item(
        &self,
        request: Request<pb::RemoveOrderItemRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.settings.simulate().await;
        let item_id = request.into_inner().item_id;
        Ok(Response::new(delete_envelope(
            self.store.remove_item(item_id),
            "order item",
            item_id,
        )))
    }
}

// ---------------------------------------------------------------------------
// Server lifecycle
// ---------------------------------------------------------------------------

/// A running mock server bound to an ephemeral loopback port.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Bind `127.0.0.1:0` and serve all three services until shutdown.
    ///
    /// # Errors
    ///
    /// Fails when the listener cannot be bound.
    pub async fn spawn(settings: MockSettings) -> Result<Self, std::io::Error> {
        Self::spawn_on(settings, (std::net::Ipv4Addr::LOCALHOST, 0).into()).await
    }

    /// Bind a caller-picked address instead of an ephemeral port.
    ///
    /// # Errors
    ///
    /// Fails when the listener cannot be bound.
    pub async fn spawn_on(
        settings: MockSettings,
        bind_addr: SocketAddr,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(bind_addr).await?;
        let addr = listener.local_addr()?;
        let store = Arc::new(MockStore::default());
        let (shutdown, rx) = oneshot::channel::<()>();

        let router = Server::builder()
            .add_service(UserServiceServer::new(MockUserService {
                store: Arc::clone(&store),
                settings: settings.clone(),
            }))
            .add_service(ProductServiceServer::new(MockProductService {
                store: Arc::clone(&store),
                settings: settings.clone(),
            }))
            .add_service(OrderServiceServer::new(MockOrderService {
                store,
                settings,
            }));

        let handle = tokio::spawn(async move {
            let incoming = TcpListenerStream::new(listener);
            if let Err(e) = router
                .serve_with_incoming_shutdown(incoming, async {
                    let _ = rx.await;
                })
                .await
            {
                tracing::error!(error = %e, "mock server terminated");
            }
        });

        tracing::debug!(%addr, "mock gRPC server listening");
        Ok(Self {
            addr,
            shutdown,
            handle,
        })
    }

    /// Address the server is listening on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Channel configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> RpcConfig {
        RpcConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
        }
    }

    /// Stop accepting calls and wait for the serve task to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}
