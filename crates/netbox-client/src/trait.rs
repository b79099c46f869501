//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::error::NetBoxError;
use serde_json::Value;

/// Trait for NetBox API client operations
///
/// The enrichment pipeline only ever reads: it needs a connectivity check
/// and a single "fetch JSON for a path and query" capability.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    /// Fetch the JSON document at `path` (relative path or full NetBox URL)
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, NetBoxError>;
}
