//! Channel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with local-development defaults:
//!
//! - `GRPC_HOST` - gRPC server host (default: 127.0.0.1)
//! - `GRPC_PORT` - gRPC server port (default: 50051)

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// gRPC endpoint configuration.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl RpcConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `GRPC_PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let port = get_env_or_default("GRPC_PORT", "50051")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GRPC_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            host: get_env_or_default("GRPC_HOST", "127.0.0.1"),
            port,
        })
    }

    /// Plaintext HTTP/2 URI for this endpoint.
    #[must_use]
    pub fn endpoint_uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uri_shape() {
        let config = RpcConfig {
            host: "grpc.internal".to_string(),
            port: 4317,
        };
        assert_eq!(config.endpoint_uri(), "http://grpc.internal:4317");
    }
}
