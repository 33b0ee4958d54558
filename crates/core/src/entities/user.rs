//! User entity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// A registered user.
///
/// `username` and `email` are natural keys: unique across all users,
/// enforced by the store. The password is an opaque string at this layer;
/// no hashing policy is applied or assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Store-assigned surrogate id.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: Email,
    /// Opaque password string.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Optional contact details.
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    /// Assigned by the store on insert.
    pub created_at: DateTime<Utc>,
    /// Touched by the store on every update.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// Sparse field-set for partially updating a [`User`].
///
/// Only fields that are `Some` are written; everything else keeps its
/// prior value. The natural keys are updatable (the store will reject a
/// conflicting value).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl UserPatch {
    /// True when no field is set; an empty patch is a read, not a write.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
    }
}
