//! Order and order-item repository for database operations.

use sqlx::{PgPool, Postgres, QueryBuilder};

use storelab_core::{
    NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderItemId, OrderPatch, OrderStatus,
    UserId,
};

use crate::error::RepositoryError;

/// Repository for order and order-item database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order and return the stored row.
    ///
    /// The referenced user is checked for existence first so the caller gets
    /// a descriptive error rather than a raw constraint failure; the foreign
    /// key remains the backstop against races with a concurrent user delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the user does not exist.
    /// Returns `RepositoryError::Conflict` if the order number already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(new.user_id)
                .fetch_one(self.pool)
                .await?;
        if !user_exists {
            return Err(RepositoryError::InvalidReference(format!(
                "order references missing user {}",
                new.user_id
            )));
        }

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO orders (user_id, order_number, total_amount, status,
                                shipping_address, billing_address, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, order_number, total_amount, status,
                      shipping_address, billing_address, payment_method,
                      created_at, updated_at
            ",
        )
        .bind(new.user_id)
        .bind(&new.order_number)
        .bind(new.total_amount)
        .bind(new.status)
        .bind(&new.shipping_address)
        .bind(&new.billing_address)
        .bind(&new.payment_method)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_order_insert_error(e, new.user_id))?;

        Ok(order)
    }

    /// Get an order by its ID. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, order_number, total_amount, status,
                   shipping_address, billing_address, payment_method,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Get an order by its order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, order_number, total_amount, status,
                   shipping_address, billing_address, payment_method,
                   created_at, updated_at
            FROM orders
            WHERE order_number = $1
            ",
        )
        .bind(order_number)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List all orders, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, order_number, total_amount, status,
                   shipping_address, billing_address, payment_method,
                   created_at, updated_at
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Apply a sparse patch to an order.
    ///
    /// Only fields present in the patch are written; `updated_at` is always
    /// touched. Returns `Ok(None)` if the id does not exist. An empty patch
    /// reads the current row back without writing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(
        &self,
        id: OrderId,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, RepositoryError> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE orders SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(total_amount) = patch.total_amount {
                fields
                    .push("total_amount = ")
                    .push_bind_unseparated(total_amount);
            }
            if let Some(status) = patch.status {
                fields.push("status = ").push_bind_unseparated(status);
            }
            if let Some(shipping_address) = &patch.shipping_address {
                fields
                    .push("shipping_address = ")
                    .push_bind_unseparated(shipping_address);
            }
            if let Some(billing_address) = &patch.billing_address {
                fields
                    .push("billing_address = ")
                    .push_bind_unseparated(billing_address);
            }
            if let Some(payment_method) = &patch.payment_method {
                fields
                    .push("payment_method = ")
                    .push_bind_unseparated(payment_method);
            }
        }
        qb.push(", updated_at = now() WHERE id = ");
        qb.push_bind(id);
        qb.push(
            r"
            RETURNING id, user_id, order_number, total_amount, status,
                      shipping_address, billing_address, payment_method,
                      created_at, updated_at
            ",
        );

        let order = qb
            .build_query_as::<Order>()
            .fetch_optional(self.pool)
            .await?;

        Ok(order)
    }

    /// Set an order's status. Any status may be set from any status; there
    /// is no transition gating.
    ///
    /// Returns `Ok(None)` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            UPDATE orders
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, user_id, order_number, total_amount, status,
                      shipping_address, billing_address, payment_method,
                      created_at, updated_at
            ",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Delete an order by id, cascading to its line items.
    ///
    /// Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Add a line item to an order.
    ///
    /// Totals are stored exactly as supplied; no stock decrement or total
    /// recomputation happens here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the order or product
    /// does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        order_id: OrderId,
        new: &NewOrderItem,
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r"
            INSERT INTO orders_items (order_id, product_id, quantity,
                                      unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, order_id, product_id, quantity,
                      unit_price, total_price, created_at
            ",
        )
        .bind(order_id)
        .bind(new.product_id)
        .bind(new.quantity)
        .bind(new.unit_price)
        .bind(new.total_price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                let constraint = db_err.constraint().unwrap_or("foreign key");
                return RepositoryError::InvalidReference(format!(
                    "order item references a missing row ({constraint})"
                ));
            }
            RepositoryError::Database(e)
        })?;

        Ok(item)
    }

    /// List the line items of an order, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, quantity,
                   unit_price, total_price, created_at
            FROM orders_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Remove a line item by its id.
    ///
    /// Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove_item(&self, item_id: OrderItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders_items WHERE id = $1")
            .bind(item_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Map insert failures to the typed lanes: unique violations are conflicts,
/// foreign-key violations mean the user vanished between pre-check and insert.
fn map_order_insert_error(e: sqlx::Error, user_id: UserId) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict("order number already exists".to_owned());
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::InvalidReference(format!(
                "order references missing user {user_id}"
            ));
        }
    }
    RepositoryError::Database(e)
}
