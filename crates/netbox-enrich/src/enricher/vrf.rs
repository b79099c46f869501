//! VRF lookup via the prefixes containing an address

use super::{Enricher, PREFIXES_PATH};
use crate::records::VrfRecord;
use netbox_client::{paginate, FnVisitor};
use serde_json::Value;
use tracing::{debug, info};

impl Enricher {
    /// VRFs of every prefix containing `ip`, in the order NetBox lists them
    ///
    /// Prefixes outside any VRF are skipped. Duplicates are kept.
    pub async fn lookup_vrfs(&self, ip: Option<&str>) -> Vec<VrfRecord> {
        let filters: Vec<(&str, &str)> = ip.map(|ip| vec![("contains", ip)]).unwrap_or_default();
        let verbose = self.verbose;

        let mut vrfs = Vec::new();
        let summary = paginate(
            self.client(),
            PREFIXES_PATH,
            &filters,
            &mut FnVisitor(|prefix: Value| {
                debug!("Prefix: {}", prefix);
                if let Some(record) = VrfRecord::from_prefix(&prefix, verbose) {
                    vrfs.push(record);
                }
            }),
        )
        .await;

        info!("Found {} VRF(s) across {} prefix(es)", vrfs.len(), summary.items);
        vrfs
    }
}
