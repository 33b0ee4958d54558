//! Channel management: one shared HTTP/2 connection, cached service stubs,
//! and deadline enforcement for unary calls.

use std::future::Future;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use crate::config::RpcConfig;
use crate::error::RpcError;
use crate::pb::{GetAllUsersRequest, OrderServiceClient, ProductServiceClient, UserServiceClient};

/// Deadline applied to unary calls when the caller does not pick one.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a unary call under a deadline and unwrap the response payload.
///
/// # Errors
///
/// Returns `RpcError::Timeout` when the deadline expires before the call
/// completes and `RpcError::Status` when the server rejects the call.
pub async fn execute<T>(
    call: impl Future<Output = Result<tonic::Response<T>, tonic::Status>>,
    timeout: Duration,
) -> Result<T, RpcError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(response)) => Ok(response.into_inner()),
        Ok(Err(status)) => Err(RpcError::Status(status)),
        Err(_) => Err(RpcError::Timeout(timeout)),
    }
}

/// Shared gRPC channel with one cached stub per service.
///
/// Cloning is cheap: every clone talks over the same underlying HTTP/2
/// connection, so callers can hand stubs to concurrent tasks freely.
#[derive(Debug, Clone)]
pub struct RpcChannels {
    users: UserServiceClient,
    products: ProductServiceClient,
    orders: OrderServiceClient,
}

impl RpcChannels {
    /// Connect eagerly and fail fast if the server is unreachable.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Config` for an unusable endpoint URI and
    /// `RpcError::Transport` when the connection attempt fails.
    pub async fn connect(config: &RpcConfig) -> Result<Self, RpcError> {
        let channel = endpoint_for(config)?.connect().await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            "gRPC channel established"
        );
        Ok(Self::from_channel(channel))
    }

    /// Build the channel without dialing; the first call connects.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Config` for an unusable endpoint URI.
    pub fn connect_lazy(config: &RpcConfig) -> Result<Self, RpcError> {
        Ok(Self::from_channel(endpoint_for(config)?.connect_lazy()))
    }

    /// Wrap an already established channel. Each stub keeps its own clone,
    /// which is what holds the connection alive.
    #[must_use]
    pub fn from_channel(channel: Channel) -> Self {
        let users = UserServiceClient::new(channel.clone());
        let products = ProductServiceClient::new(channel.clone());
        let orders = OrderServiceClient::new(channel);
        Self {
            users,
            products,
            orders,
        }
    }

    /// Stub for `storelab.UserService`.
    #[must_use]
    pub fn users(&self) -> UserServiceClient {
        self.users.clone()
    }

    /// Stub for `storelab.ProductService`.
    #[must_use]
    pub fn products(&self) -> ProductServiceClient {
        self.products.clone()
    }

    /// Stub for `storelab.OrderService`.
    #[must_use]
    pub fn orders(&self) -> OrderServiceClient {
        self.orders.clone()
    }

    /// Round-trip health check: lists one user and checks the envelope.
    ///
    /// # Errors
    ///
    /// Fails with the underlying `RpcError` when the server is unreachable,
    /// and with `RpcError::InvalidResponse` when it answers a failed envelope.
    pub async fn probe(&self) -> Result<(), RpcError> {
        let mut client = self.users();
        let request = GetAllUsersRequest {
            page: 1,
            page_size: 1,
        };
        let response = execute(client.get_all_users(request), DEFAULT_CALL_TIMEOUT).await?;
        if response.success {
            Ok(())
        } else {
            Err(RpcError::InvalidResponse(format!(
                "probe rejected: {}",
                response.message
            )))
        }
    }

    /// Drop the channel and every cached stub.
    ///
    /// In-flight calls on cloned stubs finish; new calls need a new channel.
    pub fn shutdown(self) {
        tracing::debug!("gRPC channel dropped");
    }
}

fn endpoint_for(config: &RpcConfig) -> Result<Endpoint, RpcError> {
    let uri = config.endpoint_uri();
    Endpoint::from_shared(uri.clone())
        .map(|endpoint| endpoint.connect_timeout(CONNECT_TIMEOUT))
        .map_err(|e| RpcError::Config(format!("invalid endpoint {uri}: {e}")))
}
