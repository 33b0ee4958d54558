//! Error type shared by the channel manager and the typed service calls.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by channel management and typed CRUD calls.
///
/// Absence of a row never lands here: lookups yield `Ok(None)` and deletes
/// yield `Ok(false)` when the response envelope carries `success = false`.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The underlying HTTP/2 transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The server answered with a non-OK gRPC status.
    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),

    /// The call did not complete within the configured deadline.
    #[error("rpc timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered OK but the payload failed validation.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The endpoint could not be built from the channel configuration.
    #[error("invalid channel config: {0}")]
    Config(String),
}

impl RpcError {
    /// gRPC status code of the failure, if the server produced one.
    #[must_use]
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            Self::Status(status) => Some(status.code()),
            _ => None,
        }
    }

    /// True when the failure is a deadline expiry, either locally enforced
    /// or reported by the server.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Status(status) => status.code() == tonic::Code::DeadlineExceeded,
            _ => false,
        }
    }
}
