//! Schema DDL and table maintenance.
//!
//! # Tables
//!
//! - `users` - account records; unique `username` and `email`
//! - `products` - catalog records; unique `sku`
//! - `orders` - orders referencing `users` (cascade delete)
//! - `orders_items` - line items referencing `orders` and `products`
//!   (cascade delete from either parent)
//!
//! The DDL lives here as constants rather than in migration files: the
//! schema is test infrastructure, created and dropped per suite run, so
//! `CREATE TABLE IF NOT EXISTS` in dependency order is the whole migration
//! story.

use sqlx::PgPool;

/// Table names in dependency order (parents first).
pub const TABLES: [&str; 4] = ["users", "products", "orders", "orders_items"];

const CREATE_USERS: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(100) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    phone VARCHAR(20),
    address TEXT,
    city VARCHAR(50),
    country VARCHAR(50),
    postal_code VARCHAR(20),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
";

const CREATE_PRODUCTS: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    price NUMERIC(12, 2) NOT NULL,
    category VARCHAR(50) NOT NULL,
    brand VARCHAR(50) NOT NULL,
    stock_quantity INTEGER NOT NULL DEFAULT 0,
    sku VARCHAR(50) NOT NULL UNIQUE,
    image_url VARCHAR(255) NOT NULL DEFAULT '',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
";

const CREATE_ORDERS: &str = r"
CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    order_number VARCHAR(50) NOT NULL UNIQUE,
    total_amount NUMERIC(12, 2) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'processing', 'shipped', 'delivered', 'cancelled')),
    shipping_address TEXT NOT NULL,
    billing_address TEXT NOT NULL,
    payment_method VARCHAR(50) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
";

const CREATE_ORDERS_ITEMS: &str = r"
CREATE TABLE IF NOT EXISTS orders_items (
    id SERIAL PRIMARY KEY,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    quantity INTEGER NOT NULL,
    unit_price NUMERIC(12, 2) NOT NULL,
    total_price NUMERIC(12, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
";

/// `CREATE TABLE` statements in dependency order.
const CREATE_TABLES: [&str; 4] = [
    CREATE_USERS,
    CREATE_PRODUCTS,
    CREATE_ORDERS,
    CREATE_ORDERS_ITEMS,
];

/// Create all tables that do not exist yet.
///
/// Idempotent; safe to call at the start of every suite run.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in CREATE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = ?TABLES, "schema ensured");
    Ok(())
}

/// Drop all tables.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn drop_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS orders_items, orders, products, users CASCADE")
        .execute(pool)
        .await?;
    tracing::debug!("schema dropped");
    Ok(())
}

/// Delete all rows from all tables and reset id sequences to 1.
///
/// For resetting a scratch database wholesale. Tables survive; only data
/// goes. Test suites do not call this - they rely on unique keys and
/// targeted deletes so cases can run in parallel.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn truncate_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE orders_items, orders, products, users RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}
