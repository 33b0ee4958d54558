//! RPC service tests for products, against the in-process mock server.
//!
//! Self-contained; each test spawns its own server on an ephemeral port:
//!
//! ```sh
//! cargo test -p storelab-integration-tests --test rpc_products
//! ```

use rust_decimal::Decimal;
use storelab_core::{ProductId, ProductPatch};
use storelab_integration_tests::RpcTestContext;
use tonic::Code;

// ============================================================================
// Create & Read
// ============================================================================

#[tokio::test]
async fn test_product_create_applies_defaults() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let new = ctx.factory.product();
    assert!(new.image_url.is_none());
    assert!(new.is_active.is_none());

    let created = products
        .create(&new)
        .await
        .expect("Failed to create product");
    assert_eq!(created.id, ProductId::new(1));
    assert_eq!(created.image_url, "");
    assert!(created.is_active);
    assert_eq!(created.name, new.name);
    assert_eq!(created.price, new.price);
    assert_eq!(created.sku, new.sku);

    let fetched = products
        .get_by_id(created.id)
        .await
        .expect("Failed to get product by id")
        .expect("Created product should be readable");
    assert_eq!(fetched, created);

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_product_explicit_optionals_survive_the_wire() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let new = ctx.factory.product_with(|p| {
        p.image_url = Some("https://cdn.example.com/widget.png".to_owned());
        p.is_active = Some(false);
    });
    let created = products
        .create(&new)
        .await
        .expect("Failed to create product");
    assert_eq!(created.image_url, "https://cdn.example.com/widget.png");
    assert!(!created.is_active);

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_product_lookup_by_sku() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let created = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create product");

    let by_sku = products
        .get_by_sku(&created.sku)
        .await
        .expect("Failed to get product by sku")
        .expect("Product should be found by sku");
    assert_eq!(by_sku.id, created.id);

    let missing = products
        .get_by_sku("SKU-NOPE-0")
        .await
        .expect("Absent sku lookup should not error");
    assert!(missing.is_none());

    ctx.shutdown().await;
}

// ============================================================================
// Uniqueness
// ============================================================================

#[tokio::test]
async fn test_product_duplicate_sku_maps_to_already_exists() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let first = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create first product");

    let clash = ctx.factory.product_with(|p| p.sku = first.sku.clone());
    let err = products
        .create(&clash)
        .await
        .expect_err("Duplicate sku should be rejected");
    assert_eq!(err.code(), Some(Code::AlreadyExists), "got {err:?}");

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_product_update_sku_to_taken_maps_to_already_exists() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let first = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create first product");
    let second = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create second product");

    let patch = ProductPatch {
        sku: Some(first.sku.clone()),
        ..ProductPatch::default()
    };
    let err = products
        .update(second.id, &patch)
        .await
        .expect_err("Moving onto a taken sku should be rejected");
    assert_eq!(err.code(), Some(Code::AlreadyExists), "got {err:?}");

    // The loser keeps its original sku.
    let unchanged = products
        .get_by_id(second.id)
        .await
        .expect("Failed to re-read second product")
        .expect("Second product should still exist");
    assert_eq!(unchanged.sku, second.sku);

    ctx.shutdown().await;
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_product_partial_update_merges_fields() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let created = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create product");

    let patch = ProductPatch {
        price: Some(Decimal::new(4242, 2)),
        stock_quantity: Some(3),
        ..ProductPatch::default()
    };
    let updated = products
        .update(created.id, &patch)
        .await
        .expect("Failed to update product")
        .expect("Updated product should exist");

    assert_eq!(updated.price, Decimal::new(4242, 2));
    assert_eq!(updated.stock_quantity, 3);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.sku, created.sku);
    assert_eq!(updated.brand, created.brand);

    ctx.shutdown().await;
}

// ============================================================================
// Absence, Delete & Pagination
// ============================================================================

#[tokio::test]
async fn test_product_absent_id_is_not_an_error() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();
    let missing = ProductId::new(9999);

    assert!(products
        .get_by_id(missing)
        .await
        .expect("Absent get should not error")
        .is_none());

    let patch = ProductPatch {
        stock_quantity: Some(0),
        ..ProductPatch::default()
    };
    assert!(products
        .update(missing, &patch)
        .await
        .expect("Absent update should not error")
        .is_none());

    assert!(!products
        .delete(missing)
        .await
        .expect("Absent delete should not error"));

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_product_delete_then_absent() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let created = products
        .create(&ctx.factory.product())
        .await
        .expect("Failed to create product");

    assert!(products
        .delete(created.id)
        .await
        .expect("Failed to delete product"));
    assert!(products
        .get_by_id(created.id)
        .await
        .expect("Lookup after delete should not error")
        .is_none());
    assert!(!products
        .delete(created.id)
        .await
        .expect("Second delete should not error"));

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_product_pagination_and_total_count() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    for new in ctx.factory.products(5) {
        products.create(&new).await.expect("Failed to create product");
    }

    let page = products.get_all(2, 2).await.expect("Failed to list page 2");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 5);
    let ids: Vec<i32> = page.items.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![3, 4]);

    let everything = products.get_all(1, 0).await.expect("Failed to list all");
    assert_eq!(everything.items.len(), 5);

    ctx.shutdown().await;
}
