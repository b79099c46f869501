//! Device and virtual machine lookup via assigned IP addresses
//!
//! ipam.ip_address -> dcim.interface -> dcim.device, or
//! ipam.ip_address -> virtualization.interface -> virtualization.virtual_machine

use super::{Enricher, IP_ADDRESSES_PATH, SERVICES_PATH};
use crate::fields::{id_of, label, string_field};
use crate::records::{DeviceKind, DeviceRecord};
use netbox_client::{paginate, relative_path, FnVisitor, PageVisitor};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Resolves each IP address of a page into a device record before the next
/// page is requested
struct DeviceCollector<'a> {
    enricher: &'a Enricher,
    devices: Vec<DeviceRecord>,
}

#[async_trait::async_trait]
impl<'a> PageVisitor for DeviceCollector<'a> {
    async fn visit(&mut self, ip_address: Value) {
        if let Some(record) = self.enricher.resolve_device(&ip_address).await {
            self.devices.push(record);
        }
    }
}

impl Enricher {
    /// Devices and virtual machines holding `ip`
    ///
    /// IP addresses that are not assigned to an interface are skipped.
    pub async fn lookup_devices(&self, ip: Option<&str>) -> Vec<DeviceRecord> {
        let filters: Vec<(&str, &str)> = ip.map(|ip| vec![("address", ip)]).unwrap_or_default();

        let mut collector = DeviceCollector { enricher: self, devices: Vec::new() };
        let summary = paginate(self.client(), IP_ADDRESSES_PATH, &filters, &mut collector).await;

        info!(
            "Found {} device(s) across {} IP address(es)",
            collector.devices.len(),
            summary.items
        );
        collector.devices
    }

    /// Build the device record for one raw IP address
    ///
    /// Returns `None` when the address is not assigned to a device or VM.
    pub async fn resolve_device(&self, ip_address: &Value) -> Option<DeviceRecord> {
        let (kind, stub) = DeviceKind::assigned_parent(ip_address)?;
        debug!(
            "IP address {} assigned to {} {}",
            string_field(ip_address, "address").unwrap_or_default(),
            kind.interface_field(),
            label(stub).unwrap_or_default()
        );

        let object = self.fetch_detail(stub).await;
        let services = match id_of(&object).or_else(|| id_of(stub)) {
            Some(id) => self.lookup_services(kind, id).await,
            None => Vec::new(),
        };

        Some(DeviceRecord::from_object(&object, services, self.verbose))
    }

    /// Fetch the full object behind a stub, falling back to the stub itself
    ///
    /// The stub's URL is reduced to a path under the configured base URL
    /// first, since NetBox may report a different host or proxy prefix.
    pub async fn fetch_detail(&self, stub: &Value) -> Value {
        let Some(url) = string_field(stub, "url") else {
            return stub.clone();
        };
        let path = relative_path(self.client().base_url(), &url);

        match self.client().get_json(&path, &[]).await {
            Ok(object @ Value::Object(_)) => object,
            Ok(_) => {
                warn!("Detail for {} is not an object, using the embedded stub", path);
                stub.clone()
            }
            Err(e) => {
                warn!("Failed to fetch {}, using the embedded stub: {}", path, e);
                stub.clone()
            }
        }
    }

    /// Names of the services bound to a device or virtual machine
    pub async fn lookup_services(&self, kind: DeviceKind, id: u64) -> Vec<String> {
        let id = id.to_string();
        let filters = [(kind.services_filter(), id.as_str())];

        let mut names = Vec::new();
        paginate(
            self.client(),
            SERVICES_PATH,
            &filters,
            &mut FnVisitor(|service: Value| {
                if let Some(name) = label(&service) {
                    names.push(name);
                }
            }),
        )
        .await;

        debug!("{} {} has services {:?}", kind.interface_field(), id, names);
        names
    }
}
