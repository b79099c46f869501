//! NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox API returned an error
    #[error("NetBox API error: {0}")]
    Api(String),

    /// Response body was not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Base URL or resource URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetBoxError {
    /// Whether the failure is a rejected token, which retrying cannot fix
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, NetBoxError::Authentication(_))
    }
}
