//! Repository tests for the `users` table.
//!
//! These tests require a running `PostgreSQL` database reachable through the
//! `DB_*` environment variables. They are ignored by default; run them with:
//!
//! ```sh
//! cargo test -p storelab-integration-tests -- --ignored
//! ```
//!
//! Each test deletes what it created, and natural keys come from the
//! per-test factory, so the suite is safe to run in parallel against one
//! scratch database.

use storelab_core::{UserId, UserPatch};
use storelab_db::RepositoryError;
use storelab_integration_tests::DbTestContext;

// ============================================================================
// Create & Read
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_create_and_get_round_trip() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();
    let new = ctx.factory.user();

    let created = users.create(&new).await.expect("Failed to create user");
    assert!(created.id.as_i32() >= 1);
    assert_eq!(created.username, new.username);
    assert_eq!(created.email, new.email);
    assert_eq!(created.first_name, new.first_name);
    assert_eq!(created.last_name, new.last_name);
    assert_eq!(created.phone, new.phone);
    assert_eq!(created.address, new.address);
    assert_eq!(created.city, new.city);
    assert_eq!(created.country, new.country);
    assert!(created.updated_at >= created.created_at);

    let fetched = users
        .get_by_id(created.id)
        .await
        .expect("Failed to get user by id")
        .expect("Created user should be readable");
    assert_eq!(fetched, created);

    assert!(users.delete(created.id).await.expect("Failed to delete user"));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_lookup_by_email_and_username() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let created = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create user");

    let by_email = users
        .get_by_email(&created.email)
        .await
        .expect("Failed to get user by email")
        .expect("User should be found by email");
    assert_eq!(by_email.id, created.id);

    let by_username = users
        .get_by_username(&created.username)
        .await
        .expect("Failed to get user by username")
        .expect("User should be found by username");
    assert_eq!(by_username.id, created.id);

    // A factory key that was never inserted resolves to nothing.
    let never_inserted = ctx.factory.user();
    let missing = users
        .get_by_email(&never_inserted.email)
        .await
        .expect("Absent email lookup should not error");
    assert!(missing.is_none());

    assert!(users.delete(created.id).await.expect("Failed to delete user"));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_get_all_contains_created_rows() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let a = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create first user");
    let b = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create second user");

    let all = users.get_all().await.expect("Failed to list users");
    assert!(all.iter().any(|u| u.id == a.id));
    assert!(all.iter().any(|u| u.id == b.id));

    assert!(users.delete(a.id).await.expect("Failed to delete first user"));
    assert!(users.delete(b.id).await.expect("Failed to delete second user"));
}

// ============================================================================
// Uniqueness
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_duplicate_username_is_conflict() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let first = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create first user");

    let clash = ctx.factory.user_with(|u| u.username = first.username.clone());
    let err = users
        .create(&clash)
        .await
        .expect_err("Duplicate username should be rejected");
    assert!(
        matches!(err, RepositoryError::Conflict(_)),
        "expected Conflict, got {err:?}"
    );

    assert!(users.delete(first.id).await.expect("Failed to delete user"));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_duplicate_email_is_conflict() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let first = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create first user");

    let clash = ctx.factory.user_with(|u| u.email = first.email.clone());
    let err = users
        .create(&clash)
        .await
        .expect_err("Duplicate email should be rejected");
    assert!(
        matches!(err, RepositoryError::Conflict(_)),
        "expected Conflict, got {err:?}"
    );

    assert!(users.delete(first.id).await.expect("Failed to delete user"));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_update_to_taken_username_is_conflict() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let first = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create first user");
    let second = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create second user");

    let patch = UserPatch {
        username: Some(first.username.clone()),
        ..UserPatch::default()
    };
    let err = users
        .update(second.id, &patch)
        .await
        .expect_err("Update onto a taken username should be rejected");
    assert!(
        matches!(err, RepositoryError::Conflict(_)),
        "expected Conflict, got {err:?}"
    );

    // The loser keeps its original value.
    let unchanged = users
        .get_by_id(second.id)
        .await
        .expect("Failed to re-read second user")
        .expect("Second user should still exist");
    assert_eq!(unchanged.username, second.username);

    assert!(users.delete(first.id).await.expect("Failed to delete first user"));
    assert!(users.delete(second.id).await.expect("Failed to delete second user"));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_partial_update_preserves_unset_fields() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let created = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create user");

    let patch = UserPatch {
        first_name: Some("Ada".to_owned()),
        phone: Some("+15550000001".to_owned()),
        ..UserPatch::default()
    };
    let updated = users
        .update(created.id, &patch)
        .await
        .expect("Failed to update user")
        .expect("Updated user should exist");

    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.phone.as_deref(), Some("+15550000001"));
    // Everything the patch did not mention is untouched.
    assert_eq!(updated.username, created.username);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.address, created.address);
    assert_eq!(updated.city, created.city);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    assert!(users.delete(created.id).await.expect("Failed to delete user"));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_empty_patch_reads_current_row() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let created = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create user");

    let unchanged = users
        .update(created.id, &UserPatch::default())
        .await
        .expect("Empty patch should not error")
        .expect("User should exist");
    assert_eq!(unchanged, created);

    assert!(users.delete(created.id).await.expect("Failed to delete user"));
}

// ============================================================================
// Absence & Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_absent_id_is_not_an_error() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();
    let missing = UserId::new(-1);

    let got = users
        .get_by_id(missing)
        .await
        .expect("Absent get should not error");
    assert!(got.is_none());

    let patch = UserPatch {
        first_name: Some("Nobody".to_owned()),
        ..UserPatch::default()
    };
    let updated = users
        .update(missing, &patch)
        .await
        .expect("Absent update should not error");
    assert!(updated.is_none());

    let deleted = users
        .delete(missing)
        .await
        .expect("Absent delete should not error");
    assert!(!deleted);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_user_delete_then_absent() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();

    let created = users
        .create(&ctx.factory.user())
        .await
        .expect("Failed to create user");

    assert!(users.delete(created.id).await.expect("Failed to delete user"));
    let gone = users
        .get_by_id(created.id)
        .await
        .expect("Lookup after delete should not error");
    assert!(gone.is_none());
    // Second delete finds nothing and says so.
    assert!(!users.delete(created.id).await.expect("Second delete should not error"));
}

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database (DB_* environment)"]
async fn test_transaction_commit_and_rollback() {
    let ctx = DbTestContext::new().await;
    let users = ctx.users();
    let insert = "INSERT INTO users (username, email, password, first_name, last_name)
                  VALUES ($1, $2, $3, $4, $5)";

    // Dropping the transaction without committing rolls the insert back.
    let abandoned = ctx.factory.user();
    {
        let mut tx = ctx
            .database()
            .begin()
            .await
            .expect("Failed to begin transaction");
        sqlx::query(insert)
            .bind(&abandoned.username)
            .bind(abandoned.email.as_str())
            .bind(&abandoned.password)
            .bind(&abandoned.first_name)
            .bind(&abandoned.last_name)
            .execute(&mut *tx)
            .await
            .expect("Failed to insert inside transaction");
    }
    let rolled_back = users
        .get_by_username(&abandoned.username)
        .await
        .expect("Lookup should not error");
    assert!(rolled_back.is_none());

    // An explicit commit makes the row visible.
    let committed = ctx.factory.user();
    let mut tx = ctx
        .database()
        .begin()
        .await
        .expect("Failed to begin transaction");
    sqlx::query(insert)
        .bind(&committed.username)
        .bind(committed.email.as_str())
        .bind(&committed.password)
        .bind(&committed.first_name)
        .bind(&committed.last_name)
        .execute(&mut *tx)
        .await
        .expect("Failed to insert inside transaction");
    tx.commit().await.expect("Failed to commit");

    let visible = users
        .get_by_username(&committed.username)
        .await
        .expect("Lookup should not error")
        .expect("Committed row should be visible");
    assert!(users.delete(visible.id).await.expect("Failed to delete user"));
}
