//! User repository for database operations.

use sqlx::{PgPool, Postgres, QueryBuilder};

use storelab_core::{Email, NewUser, User, UserId, UserPatch};

use crate::error::RepositoryError;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email already
    /// exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, email, password, first_name, last_name,
                               phone, address, city, country, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, username, email, password, first_name, last_name,
                      phone, address, city, country, postal_code,
                      created_at, updated_at
            ",
        )
        .bind(&new.username)
        .bind(new.email.as_str())
        .bind(&new.password)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.phone.as_deref())
        .bind(new.address.as_deref())
        .bind(new.city.as_deref())
        .bind(new.country.as_deref())
        .bind(new.postal_code.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Get a user by their ID. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   phone, address, city, country, postal_code,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   phone, address, city, country, postal_code,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   phone, address, city, country, postal_code,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// List all users, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   phone, address, city, country, postal_code,
                   created_at, updated_at
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Apply a sparse patch to a user.
    ///
    /// Only fields present in the patch are written; `updated_at` is always
    /// touched. Returns `Ok(None)` if the id does not exist. An empty patch
    /// reads the current row back without writing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the patch sets a username or
    /// email that already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE users SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(username) = &patch.username {
                fields.push("username = ").push_bind_unseparated(username);
            }
            if let Some(email) = &patch.email {
                fields.push("email = ").push_bind_unseparated(email.as_str());
            }
            if let Some(password) = &patch.password {
                fields.push("password = ").push_bind_unseparated(password);
            }
            if let Some(first_name) = &patch.first_name {
                fields.push("first_name = ").push_bind_unseparated(first_name);
            }
            if let Some(last_name) = &patch.last_name {
                fields.push("last_name = ").push_bind_unseparated(last_name);
            }
            if let Some(phone) = &patch.phone {
                fields.push("phone = ").push_bind_unseparated(phone);
            }
            if let Some(address) = &patch.address {
                fields.push("address = ").push_bind_unseparated(address);
            }
            if let Some(city) = &patch.city {
                fields.push("city = ").push_bind_unseparated(city);
            }
            if let Some(country) = &patch.country {
                fields.push("country = ").push_bind_unseparated(country);
            }
            if let Some(postal_code) = &patch.postal_code {
                fields.push("postal_code = ").push_bind_unseparated(postal_code);
            }
        }
        qb.push(", updated_at = now() WHERE id = ");
        qb.push_bind(id);
        qb.push(
            r"
            RETURNING id, username, email, password, first_name, last_name,
                      phone, address, city, country, postal_code,
                      created_at, updated_at
            ",
        );

        let user = qb
            .build_query_as::<User>()
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict(
                        "username or email already exists".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(user)
    }

    /// Delete a user by id, cascading to their orders.
    ///
    /// Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
