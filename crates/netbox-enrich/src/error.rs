//! Enrichment errors.
//!
//! Transport failures inside a lookup are recovered where they happen and
//! never reach this type; only setup and output problems do.

use netbox_client::NetBoxError;
use thiserror::Error;

/// Errors that can abort an enrichment run.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// NetBox API error
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Records could not be converted to JSON
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}
