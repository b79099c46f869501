//! NetBox IP enrichment
//!
//! Given an IP address, walks NetBox's prefixes, IP addresses, services and
//! manufacturers and produces one pruned, column-oriented JSON summary:
//!
//! ```json
//! {
//!   "vrfs": { "name": ["red"], "id": [5], "site": ["HQ"], "url": ["..."] },
//!   "devices": { "name": ["core-01"], "service": ["dns", "http"], "...": [] },
//!   "manuf": { "name": "Cisco Systems", "id": 1, "url": "...", "match": 0.88 }
//! }
//! ```
//!
//! Lookups never fail the run on transport errors: each stage stops where
//! the failure happened and reports what it had.

pub mod backoff;
pub mod columns;
pub mod config;
pub mod enricher;
pub mod error;
pub mod fields;
pub mod matcher;
pub mod prune;
pub mod records;

pub use columns::Columns;
pub use config::Config;
pub use enricher::{Enricher, Summary};
pub use error::EnrichError;
pub use records::{DeviceKind, DeviceRecord, ManufacturerMatch, VrfRecord};
