//! Product repository for database operations.

use sqlx::{PgPool, Postgres, QueryBuilder};

use storelab_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::error::RepositoryError;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product and return the stored row.
    ///
    /// `image_url` defaults to `""` and `is_active` to `true` when the
    /// payload leaves them unset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the sku already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (name, description, price, category, brand,
                                  stock_quantity, sku, image_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, description, price, category, brand,
                      stock_quantity, sku, image_url, is_active,
                      created_at, updated_at
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.category)
        .bind(&new.brand)
        .bind(new.stock_quantity)
        .bind(&new.sku)
        .bind(new.image_url.as_deref().unwrap_or(""))
        .bind(new.is_active.unwrap_or(true))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("sku already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(product)
    }

    /// Get a product by its ID. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, brand,
                   stock_quantity, sku, image_url, is_active,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Get a product by its sku.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, brand,
                   stock_quantity, sku, image_url, is_active,
                   created_at, updated_at
            FROM products
            WHERE sku = $1
            ",
        )
        .bind(sku)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List all products, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, brand,
                   stock_quantity, sku, image_url, is_active,
                   created_at, updated_at
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Apply a sparse patch to a product.
    ///
    /// Only fields present in the patch are written; `updated_at` is always
    /// touched. Returns `Ok(None)` if the id does not exist. An empty patch
    /// reads the current row back without writing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the patch sets a sku that
    /// already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE products SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(name) = &patch.name {
                fields.push("name = ").push_bind_unseparated(name);
            }
            if let Some(description) = &patch.description {
                fields.push("description = ").push_bind_unseparated(description);
            }
            if let Some(price) = patch.price {
                fields.push("price = ").push_bind_unseparated(price);
            }
            if let Some(category) = &patch.category {
                fields.push("category = ").push_bind_unseparated(category);
            }
            if let Some(brand) = &patch.brand {
                fields.push("brand = ").push_bind_unseparated(brand);
            }
            if let Some(stock_quantity) = patch.stock_quantity {
                fields
                    .push("stock_quantity = ")
                    .push_bind_unseparated(stock_quantity);
            }
            if let Some(sku) = &patch.sku {
                fields.push("sku = ").push_bind_unseparated(sku);
            }
            if let Some(image_url) = &patch.image_url {
                fields.push("image_url = ").push_bind_unseparated(image_url);
            }
            if let Some(is_active) = patch.is_active {
                fields.push("is_active = ").push_bind_unseparated(is_active);
            }
        }
        qb.push(", updated_at = now() WHERE id = ");
        qb.push_bind(id);
        qb.push(
            r"
            RETURNING id, name, description, price, category, brand,
                      stock_quantity, sku, image_url, is_active,
                      created_at, updated_at
            ",
        );

        let product = qb
            .build_query_as::<Product>()
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("sku already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        Ok(product)
    }

    /// Delete a product by id, cascading to line items that reference it.
    ///
    /// Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
