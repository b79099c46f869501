//! NetBox API client
//!
//! Read-only access to the NetBox REST API. Every request carries the token
//! header and JSON accept/content-type headers; one `reqwest::Client` (and so
//! one keep-alive connection pool) is reused for the whole run.

use crate::common::{build_query_string, relative_path};
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    client: Client,
    base_url: String,
    token: String,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80" or "https://host/netbox")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new NetBox client with an explicit request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, NetBoxError> {
        Url::parse(&base_url)
            .map_err(|e| NetBoxError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path relative to the base URL
    ///
    /// Absolute URLs are first reduced to a base-relative path so that a
    /// NetBox instance reporting its own hostname (or a proxy prefix) is
    /// still reached through the configured base URL.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, relative_path(&self.base_url, path))
    }

    /// Get authorization header value
    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// Uses the status endpoint as it's lightweight and requires authentication.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and NetBox is reachable
    /// * `Err(NetBoxError)` - Token is invalid or NetBox is unreachable
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        let url = self.build_url("/api/status/");
        debug!("Validating NetBox token and connectivity");

        let response = self.client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NetBoxError::Authentication(format!(
                "Invalid token: {} - {}",
                status, body
            )));
        }

        if !status.is_success() {
            return Err(NetBoxError::Api(format!(
                "Failed to validate token: {} - {}",
                status, body
            )));
        }

        debug!("Token validated successfully");
        Ok(())
    }

    /// Fetch a JSON document for a resource path and query parameters
    ///
    /// # Arguments
    /// * `path` - Resource path (e.g., "/api/ipam/prefixes/") or a full NetBox URL
    /// * `query` - Query parameters, appended in order
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded body; not necessarily a JSON object
    /// * `Err(NetBoxError)` - Transport failure, non-2xx status or non-JSON body
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, NetBoxError> {
        let mut url = self.build_url(path);
        if !query.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            url = format!("{}{}{}", url, separator, build_query_string(query));
        }
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(NetBoxError::NotFound(format!(
                "Resource not found: {} - {}",
                path, body
            )));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(NetBoxError::Authentication(format!(
                "GET {} rejected: {} - {}",
                path, status, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetBoxError::Api(format!(
                "GET {} failed: {} - {}",
                path, status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(NetBoxError::Serialization)
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.validate_token().await
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, NetBoxError> {
        self.get_json(path, query).await
    }
}
