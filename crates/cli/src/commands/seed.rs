//! Seed the database with synthetic rows.
//!
//! # Usage
//!
//! ```bash
//! storelab seed --users 5 --products 10 --orders 3
//! ```
//!
//! Rows come from the collision-resistant test-data factory, so repeated
//! runs never collide on usernames, emails, SKUs, or order numbers. Orders
//! are spread round-robin over the users seeded in the same run.
//!
//! # Environment Variables
//!
//! `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` - see
//! [`storelab_db::DbConfig`].

use storelab_core::TestDataFactory;
use storelab_db::{Database, DbConfig, OrderRepository, ProductRepository, UserRepository, schema};
use tracing::info;

/// Seed `users`, `products`, and `orders` rows, ensuring the schema first.
///
/// # Errors
///
/// Returns an error when orders are requested without users, or when any
/// insert fails.
pub async fn run(
    users: u32,
    products: u32,
    orders: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if orders > 0 && users == 0 {
        return Err("cannot seed orders without users".into());
    }

    let config = DbConfig::from_env()?;
    let db = Database::connect(&config).await?;
    schema::ensure_schema(db.pool()).await?;

    let factory = TestDataFactory::new();
    info!(run_tag = factory.run_tag(), "Seeding");

    let user_repo = UserRepository::new(db.pool());
    let mut user_ids = Vec::new();
    for _ in 0..users {
        let user = user_repo.create(&factory.user()).await?;
        user_ids.push(user.id);
    }
    info!(count = user_ids.len(), "Seeded users");

    let product_repo = ProductRepository::new(db.pool());
    for _ in 0..products {
        product_repo.create(&factory.product()).await?;
    }
    info!(count = products, "Seeded products");

    let order_repo = OrderRepository::new(db.pool());
    let mut owners = user_ids.iter().copied().cycle();
    for _ in 0..orders {
        let Some(user_id) = owners.next() else { break };
        order_repo.create(&factory.order(user_id)).await?;
    }
    info!(count = orders, "Seeded orders");

    db.close().await;
    Ok(())
}
