//! Command-line configuration and logging setup.

use crate::error::EnrichError;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn";

/// Look up an IP address in NetBox and print the VRFs, devices, services and
/// (optionally) manufacturer associated with it as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "netbox-enrich", version)]
pub struct Config {
    /// NetBox base URL
    #[arg(short = 'u', long = "url", env = "NETBOX_URL")]
    pub url: String,

    /// NetBox API token
    #[arg(short = 't', long = "token", env = "NETBOX_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Search by this IP address
    #[arg(short = 'i', long = "ip")]
    pub ip: Option<String>,

    /// Vendor name (e.g. from a MAC address OUI) to match against manufacturers
    #[arg(short = 'o', long = "oui")]
    pub oui: Option<String>,

    /// Include the raw NetBox objects under `details`
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Wait for NetBox to answer before querying
    #[arg(long = "wait")]
    pub wait: bool,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", default_value_t = netbox_client::client::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Config {
    /// Reject values clap accepts but a run cannot use
    pub fn validate(&self) -> Result<(), EnrichError> {
        if self.url.trim().is_empty() {
            return Err(EnrichError::InvalidConfig("NetBox URL must not be empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(EnrichError::InvalidConfig("NetBox token must not be empty".to_string()));
        }
        if self.timeout == 0 {
            return Err(EnrichError::InvalidConfig("timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Search address, ignoring an empty argument
    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref().map(str::trim).filter(|ip| !ip.is_empty())
    }

    /// Vendor string, ignoring an empty argument
    pub fn oui(&self) -> Option<&str> {
        self.oui.as_deref().map(str::trim).filter(|oui| !oui.is_empty())
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout carries only the JSON summary. The filter is
/// read from `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
