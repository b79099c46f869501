//! Lookup orchestration.
//!
//! The enricher is organized by the NetBox collection each stage walks:
//! - `vrf`: prefixes containing the address, reduced to their VRFs
//! - `device`: IP addresses, their devices/VMs and the services bound to them
//! - `manufacturer`: fuzzy vendor match over the manufacturer list
//!
//! Every stage keeps whatever it gathered when a request fails; only record
//! serialization can make a run fail.

pub mod device;
pub mod manufacturer;
pub mod vrf;

#[cfg(test)]
mod enricher_test;

use crate::columns::Columns;
use crate::error::EnrichError;
use crate::prune::crush;
use crate::records::ManufacturerMatch;
use netbox_client::NetBoxClientTrait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub(crate) const PREFIXES_PATH: &str = "/api/ipam/prefixes/";
pub(crate) const IP_ADDRESSES_PATH: &str = "/api/ipam/ip-addresses/";
pub(crate) const SERVICES_PATH: &str = "/api/ipam/services/";
pub(crate) const MANUFACTURERS_PATH: &str = "/api/dcim/manufacturers/";

/// Column holding each device's service names
const SERVICE_COLUMN: &str = "service";

/// Final document printed by the tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub vrfs: Columns,
    pub devices: Columns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manuf: Option<ManufacturerMatch>,
}

/// Runs the lookups for one address against NetBox.
pub struct Enricher {
    pub(crate) netbox_client: Box<dyn NetBoxClientTrait + Send + Sync>,
    /// Attach raw objects under `details`
    pub(crate) verbose: bool,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("base_url", &self.netbox_client.base_url())
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Enricher {
    pub fn new(netbox_client: Box<dyn NetBoxClientTrait + Send + Sync>, verbose: bool) -> Self {
        Self { netbox_client, verbose }
    }

    pub(crate) fn client(&self) -> &dyn NetBoxClientTrait {
        self.netbox_client.as_ref()
    }

    /// Look up `ip` and, when given, match `oui` against the manufacturer list
    ///
    /// Without an address the prefix and IP address collections are walked
    /// unfiltered.
    pub async fn run(&self, ip: Option<&str>, oui: Option<&str>) -> Result<Summary, EnrichError> {
        info!("Looking up {} in {}", ip.unwrap_or("all addresses"), self.client().base_url());

        let vrfs = columnize(&self.lookup_vrfs(ip).await)?;

        let mut devices = columnize(&self.lookup_devices(ip).await)?;
        devices.flatten_unique(SERVICE_COLUMN);

        let manuf = match oui {
            Some(oui) => Some(self.match_manufacturer(oui).await),
            None => None,
        };

        Ok(Summary { vrfs, devices, manuf })
    }
}

/// Serialize records, prune placeholders and fold the result into columns
pub fn columnize<T: Serialize>(records: &[T]) -> Result<Columns, EnrichError> {
    let pruned = crush(serde_json::to_value(records)?);
    let rows = match pruned {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    };
    Ok(Columns::collect(rows))
}
