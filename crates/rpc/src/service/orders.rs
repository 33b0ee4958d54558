//! Typed CRUD calls against `storelab.OrderService`, items included.

use std::time::Duration;

use storelab_core::{
    NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderItemId, OrderPatch, OrderStatus,
};

use crate::channel::{DEFAULT_CALL_TIMEOUT, RpcChannels, execute};
use crate::convert;
use crate::error::RpcError;
use crate::pb;
use crate::pb::OrderServiceClient;

use super::Page;

/// Order and order-item CRUD over gRPC.
#[derive(Debug, Clone)]
pub struct OrderRpcService {
    client: OrderServiceClient,
    timeout: Duration,
}

impl OrderRpcService {
    /// Service with the default per-call deadline.
    #[must_use]
    pub fn new(channels: &RpcChannels) -> Self {
        Self::with_timeout(channels, DEFAULT_CALL_TIMEOUT)
    }

    /// Service with a caller-picked per-call deadline.
    #[must_use]
    pub fn with_timeout(channels: &RpcChannels, timeout: Duration) -> Self {
        Self {
            client: channels.orders(),
            timeout,
        }
    }

    /// Create an order for an existing user.
    ///
    /// # Errors
    ///
    /// A missing user surfaces as `RpcError::Status` with
    /// `FAILED_PRECONDITION`; a duplicate order number as `ALREADY_EXISTS`.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.create_order(convert::create_order_request(new)),
            self.timeout,
        )
        .await?;
        unwrap_created(response)
    }

    /// Look an order up by id; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_order(pb::GetOrderRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Look an order up by its business number; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_order_number(&self, order_number: &str) -> Result<Option<Order>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_order_by_number(pb::GetOrderByNumberRequest {
                order_number: order_number.to_owned(),
            }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// One page of orders in id order. `page` is 1-based; `page_size <= 0`
    /// means "no limit".
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_all(&self, page: i32, page_size: i32) -> Result<Page<Order>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_all_orders(pb::GetAllOrdersRequest { page, page_size }),
            self.timeout,
        )
        .await?;
        if !response.success {
            return Err(RpcError::InvalidResponse(format!(
                "get_all_orders rejected: {}",
                response.message
            )));
        }
        let items = response
            .orders
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            total_count: response.total_count,
        })
    }

    /// Apply a sparse patch; unset fields keep their prior value.
    /// `Ok(None)` when the order does not exist.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn update(&self, id: OrderId, patch: &OrderPatch) -> Result<Option<Order>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.update_order(convert::update_order_request(id, patch)),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Set the status unconditionally; any status may replace any status.
    /// `Ok(None)` when the order does not exist.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.update_order_status(pb::UpdateOrderStatusRequest {
                id: id.as_i32(),
                status: status.as_str().to_owned(),
            }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Delete by id; `Ok(false)` when there was nothing to delete.
    /// The store cascades the order's items away.
    ///
    /// # Errors
    ///
    /// Transport failures and deadline expiry.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.delete_order(pb::DeleteOrderRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        Ok(response.success)
    }

    /// Attach an item to an order. No side effects on the order or the
    /// product.
    ///
    /// # Errors
    ///
    /// A missing order or product surfaces as `RpcError::Status` with
    /// `FAILED_PRECONDITION`.
    pub async fn add_item(
        &self,
        order_id: OrderId,
        new: &NewOrderItem,
    ) -> Result<OrderItem, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.add_order_item(convert::add_order_item_request(order_id, new)),
            self.timeout,
        )
        .await?;
        if !response.success {
            return Err(RpcError::InvalidResponse(format!(
                "add_order_item rejected: {}",
                response.message
            )));
        }
        response
            .item
            .ok_or_else(|| {
                RpcError::InvalidResponse("add_order_item: missing item payload".to_owned())
            })?
            .try_into()
    }

    /// All items attached to an order, in id order. An order with no items
    /// (or no such order) yields an empty list.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_order_items(pb::GetOrderItemsRequest {
                order_id: order_id.as_i32(),
            }),
            self.timeout,
        )
        .await?;
        if !response.success {
            return Err(RpcError::InvalidResponse(format!(
                "get_order_items rejected: {}",
                response.message
            )));
        }
        response
            .items
            .into_iter()
            .map(OrderItem::try_from)
            .collect()
    }

    /// Detach one item by its id; `Ok(false)` when there was nothing to
    /// remove.
    ///
    /// # Errors
    ///
    /// Transport failures and deadline expiry.
    pub async fn remove_item(&self, item_id: OrderItemId) -> Result<bool, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.remove_order_item(pb::RemoveOrderItemRequest {
                item_id: item_id.as_i32(),
            }),
            self.timeout,
        )
        .await?;
        Ok(response.success)
    }
}

fn unwrap_created(response: pb::OrderResponse) -> Result<Order, RpcError> {
    if !response.success {
        return Err(RpcError::InvalidResponse(format!(
            "create_order rejected: {}",
            response.message
        )));
    }
    response
        .order
        .ok_or_else(|| RpcError::InvalidResponse("create_order: missing order payload".to_owned()))?
        .try_into()
}

fn unwrap_optional(response: pb::OrderResponse) -> Result<Option<Order>, RpcError> {
    if response.success {
        response.order.map(Order::try_from).transpose()
    } else {
        Ok(None)
    }
}
