//! Channel-level tests: reachability, deadlines, concurrency, and teardown.
//!
//! Self-contained; each test spawns its own mock server on an ephemeral
//! port:
//!
//! ```sh
//! cargo test -p storelab-integration-tests --test rpc_channel
//! ```

use std::collections::HashSet;
use std::time::{Duration, Instant};

use futures::future::join_all;
use storelab_core::UserId;
use storelab_integration_tests::RpcTestContext;
use storelab_rpc::{MockSettings, UserRpcService};
use tonic::Code;

// ============================================================================
// Reachability
// ============================================================================

#[tokio::test]
async fn test_probe_confirms_endpoint_is_reachable() {
    let ctx = RpcTestContext::new().await;
    ctx.channels.probe().await.expect("Probe should succeed");
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_calls_after_shutdown_fail() {
    let ctx = RpcTestContext::new().await;
    let users = ctx.users();

    users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create user before shutdown");

    ctx.shutdown().await;

    let result = users.get_by_id(UserId::new(1)).await;
    assert!(result.is_err(), "call against a dead server should fail");
}

// ============================================================================
// Deadlines
// ============================================================================

#[tokio::test]
async fn test_call_deadline_expiry_surfaces_as_timeout() {
    let ctx = RpcTestContext::with_settings(MockSettings {
        latency: Some(Duration::from_millis(100)),
    })
    .await;

    // A deadline shorter than the injected latency must trip.
    let impatient = UserRpcService::with_timeout(&ctx.channels, Duration::from_millis(1));
    let err = impatient
        .create(&ctx.factory.user())
        .await
        .expect_err("1ms deadline against 100ms latency should expire");
    assert!(err.is_timeout(), "expected a timeout, got {err:?}");

    // The default deadline rides out the same latency fine.
    let patient = ctx.users();
    patient
        .create(&ctx.factory.user())
        .await
        .expect("Default deadline should survive 100ms latency");

    ctx.shutdown().await;
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_bulk_concurrent_creates_all_succeed() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();
    let payloads = ctx.factory.products(10);

    let started = Instant::now();
    let results = join_all(payloads.iter().map(|p| products.create(p))).await;
    let elapsed = started.elapsed();

    let mut ids = HashSet::new();
    for result in results {
        let created = result.expect("Every concurrent create should succeed");
        ids.insert(created.id.as_i32());
    }
    assert_eq!(ids.len(), 10, "ids must be mutually distinct");
    assert!(
        elapsed < Duration::from_secs(30),
        "bulk create took {elapsed:?}"
    );

    let listing = products.get_all(1, 0).await.expect("Failed to list all");
    assert_eq!(listing.total_count, 10);

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_duplicate_sku_has_single_winner() {
    let ctx = RpcTestContext::new().await;
    let products = ctx.products();

    let first = ctx.factory.product();
    let second = ctx.factory.product_with(|p| p.sku = first.sku.clone());

    let (a, b) = tokio::join!(products.create(&first), products.create(&second));
    assert!(
        a.is_ok() ^ b.is_ok(),
        "exactly one create should win: {a:?} / {b:?}"
    );
    let err = if let Err(e) = a {
        e
    } else {
        b.expect_err("XOR above guarantees one failure")
    };
    assert_eq!(err.code(), Some(Code::AlreadyExists), "got {err:?}");

    // Only the winner is in the store.
    let listing = products.get_all(1, 0).await.expect("Failed to list all");
    assert_eq!(listing.total_count, 1);

    ctx.shutdown().await;
}
