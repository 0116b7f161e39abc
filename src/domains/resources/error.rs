//! Resource-specific error types.

use thiserror::Error;

use crate::clients::ClientError;
use crate::core::services::Credential;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource URI is invalid.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The resource needs an API key that is not configured.
    #[error("{0} environment variable is not set")]
    ConfigMissing(Credential),

    /// Fetching the underlying data failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] ClientError),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }
}

impl From<Credential> for ResourceError {
    fn from(credential: Credential) -> Self {
        Self::ConfigMissing(credential)
    }
}
