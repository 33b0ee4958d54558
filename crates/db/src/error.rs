//! Error type shared by all repositories.

use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Absence of a row is never an error: lookups return `Ok(None)` and deletes
/// return `Ok(false)` when nothing matched. The variants here cover the
/// invalidity lane - constraint violations, bad references, and transport
/// failures from the store itself.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (includes row-decode failures).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique-constraint violation (e.g., duplicate email or sku).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign-key violation or failed existence pre-check (e.g., an order
    /// referencing a user that does not exist).
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}
