//! NetBox REST API Client
//!
//! A read-only Rust client for the NetBox REST API, covering what is needed
//! to walk IPAM/DCIM collections: authenticated JSON fetches, offset/limit
//! pagination and URL normalization.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{paginate, FnVisitor, NetBoxClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Collect every prefix containing an address
//! let mut prefixes = Vec::new();
//! paginate(
//!     &client,
//!     "/api/ipam/prefixes/",
//!     &[("contains", "10.0.0.1")],
//!     &mut FnVisitor(|p: serde_json::Value| prefixes.push(p)),
//! )
//! .await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::NetBoxClient;
pub use common::query::{paginate, FnVisitor, PageSummary, PageVisitor, PAGE_SIZE};
pub use common::{build_query_string, relative_path};
pub use error::NetBoxError;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockNetBoxClient;
