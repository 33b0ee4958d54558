//! Typed CRUD calls against `storelab.ProductService`.

use std::time::Duration;

use storelab_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::channel::{DEFAULT_CALL_TIMEOUT, RpcChannels, execute};
use crate::convert;
use crate::error::RpcError;
use crate::pb;
use crate::pb::ProductServiceClient;

use super::Page;

/// Product CRUD over gRPC.
#[derive(Debug, Clone)]
pub struct ProductRpcService {
    client: ProductServiceClient,
    timeout: Duration,
}

impl ProductRpcService {
    /// Service with the default per-call deadline.
    #[must_use]
    pub fn new(channels: &RpcChannels) -> Self {
        Self::with_timeout(channels, DEFAULT_CALL_TIMEOUT)
    }

    /// Service with a caller-picked per-call deadline.
    #[must_use]
    pub fn with_timeout(channels: &RpcChannels, timeout: Duration) -> Self {
        Self {
            client: channels.products(),
            timeout,
        }
    }

    /// Create a product; the store fills `image_url` and `is_active`
    /// defaults when the payload leaves them unset.
    ///
    /// # Errors
    ///
    /// A taken SKU surfaces as `RpcError::Status` with `ALREADY_EXISTS`.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.create_product(convert::create_product_request(new)),
            self.timeout,
        )
        .await?;
        unwrap_created(response)
    }

    /// Look a product up by id; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_product(pb::GetProductRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Look a product up by SKU; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_product_by_sku(pb::GetProductBySkuRequest {
                sku: sku.to_owned(),
            }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// One page of products in id order. `page` is 1-based; `page_size <= 0`
    /// means "no limit".
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_all(&self, page: i32, page_size: i32) -> Result<Page<Product>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_all_products(pb::GetAllProductsRequest { page, page_size }),
            self.timeout,
        )
        .await?;
        if !response.success {
            return Err(RpcError::InvalidResponse(format!(
                "get_all_products rejected: {}",
                response.message
            )));
        }
        let items = response
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            total_count: response.total_count,
        })
    }

    /// Apply a sparse patch; unset fields keep their prior value.
    /// `Ok(None)` when the product does not exist.
    ///
    /// # Errors
    ///
    /// Moving the SKU onto a taken value surfaces as `RpcError::Status`
    /// with `ALREADY_EXISTS`.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.update_product(convert::update_product_request(id, patch)),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Delete by id; `Ok(false)` when there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Transport failures and deadline expiry.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.delete_product(pb::DeleteProductRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        Ok(response.success)
    }
}

fn unwrap_created(response: pb::ProductResponse) -> Result<Product, RpcError> {
    if !response.success {
        return Err(RpcError::InvalidResponse(format!(
            "create_product rejected: {}",
            response.message
        )));
    }
    response
        .product
        .ok_or_else(|| {
            RpcError::InvalidResponse("create_product: missing product payload".to_owned())
        })?
        .try_into()
}

fn unwrap_optional(response: pb::ProductResponse) -> Result<Option<Product>, RpcError> {
    if response.success {
        response.product.map(Product::try_from).transpose()
    } else {
        Ok(None)
    }
}
