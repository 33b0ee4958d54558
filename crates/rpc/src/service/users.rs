//! Typed CRUD calls against `storelab.UserService`.

use std::time::Duration;

use storelab_core::{NewUser, User, UserId, UserPatch};

use crate::channel::{DEFAULT_CALL_TIMEOUT, RpcChannels, execute};
use crate::convert;
use crate::error::RpcError;
use crate::pb;
use crate::pb::UserServiceClient;

use super::Page;

/// User CRUD over gRPC.
#[derive(Debug, Clone)]
pub struct UserRpcService {
    client: UserServiceClient,
    timeout: Duration,
}

impl UserRpcService {
    /// Service with the default per-call deadline.
    #[must_use]
    pub fn new(channels: &RpcChannels) -> Self {
        Self::with_timeout(channels, DEFAULT_CALL_TIMEOUT)
    }

    /// Service with a caller-picked per-call deadline.
    #[must_use]
    pub fn with_timeout(channels: &RpcChannels, timeout: Duration) -> Self {
        Self {
            client: channels.users(),
            timeout,
        }
    }

    /// Create a user and return it with store-assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// A taken username or email surfaces as `RpcError::Status` with
    /// `ALREADY_EXISTS`.
    pub async fn create(&self, new: &NewUser) -> Result<User, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.create_user(convert::create_user_request(new)),
            self.timeout,
        )
        .await?;
        unwrap_created(response)
    }

    /// Look a user up by id; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_user(pb::GetUserRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Look a user up by email; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_user_by_email(pb::GetUserByEmailRequest {
                email: email.to_owned(),
            }),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// One page of users in id order. `page` is 1-based; `page_size <= 0`
    /// means "no limit".
    ///
    /// # Errors
    ///
    /// Transport failures, deadline expiry, and malformed payloads.
    pub async fn get_all(&self, page: i32, page_size: i32) -> Result<Page<User>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.get_all_users(pb::GetAllUsersRequest { page, page_size }),
            self.timeout,
        )
        .await?;
        if !response.success {
            return Err(RpcError::InvalidResponse(format!(
                "get_all_users rejected: {}",
                response.message
            )));
        }
        let items = response
            .users
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            total_count: response.total_count,
        })
    }

    /// Apply a sparse patch; unset fields keep their prior value.
    /// `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Moving the username or email onto a taken value surfaces as
    /// `RpcError::Status` with `ALREADY_EXISTS`.
    pub async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.update_user(convert::update_user_request(id, patch)),
            self.timeout,
        )
        .await?;
        unwrap_optional(response)
    }

    /// Delete by id; `Ok(false)` when there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Transport failures and deadline expiry.
    pub async fn delete(&self, id: UserId) -> Result<bool, RpcError> {
        let mut client = self.client.clone();
        let response = execute(
            client.delete_user(pb::DeleteUserRequest { id: id.as_i32() }),
            self.timeout,
        )
        .await?;
        Ok(response.success)
    }
}

fn unwrap_created(response: pb::UserResponse) -> Result<User, RpcError> {
    if !response.success {
        return Err(RpcError::InvalidResponse(format!(
            "create_user rejected: {}",
            response.message
        )));
    }
    response
        .user
        .ok_or_else(|| RpcError::InvalidResponse("create_user: missing user payload".to_owned()))?
        .try_into()
}

fn unwrap_optional(response: pb::UserResponse) -> Result<Option<User>, RpcError> {
    if response.success {
        response.user.map(User::try_from).transpose()
    } else {
        Ok(None)
    }
}
