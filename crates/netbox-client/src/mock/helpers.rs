//! Helper functions for building raw NetBox JSON objects

use serde_json::{json, Value};

/// Builders for the nested objects NetBox returns
#[derive(Debug, Clone)]
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// URL of an object under `endpoint` (e.g., "dcim/devices")
    pub fn url(&self, endpoint: &str, id: u64) -> String {
        format!("{}/api/{}/{}/", self.base_url, endpoint, id)
    }

    /// Brief nested representation: id, url, display and name
    pub fn nested(&self, endpoint: &str, id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "url": self.url(endpoint, id),
            "display": name,
            "name": name,
        })
    }

    /// Partial nested object carrying only a display label
    pub fn display_stub(&self, display: &str) -> Value {
        json!({ "display": display })
    }

    /// Helper to create a nested VRF
    pub fn create_nested_vrf(&self, id: u64, name: &str) -> Value {
        self.nested("ipam/vrfs", id, name)
    }

    /// Helper to create a nested site
    pub fn create_nested_site(&self, id: u64, name: &str) -> Value {
        let mut site = self.nested("dcim/sites", id, name);
        site["slug"] = json!(name.to_lowercase().replace(' ', "-"));
        site
    }

    /// Helper to create a nested tenant
    pub fn create_nested_tenant(&self, id: u64, name: &str) -> Value {
        let mut tenant = self.nested("tenancy/tenants", id, name);
        tenant["slug"] = json!(name.to_lowercase().replace(' ', "-"));
        tenant
    }

    /// Helper to create a manufacturer
    pub fn create_manufacturer(&self, id: u64, name: &str) -> Value {
        let mut manufacturer = self.nested("dcim/manufacturers", id, name);
        manufacturer["slug"] = json!(name.to_lowercase().replace(' ', "-"));
        manufacturer
    }

    /// Helper to create a nested device type; NetBox labels these by model
    pub fn create_nested_device_type(&self, id: u64, model: &str, manufacturer: Value) -> Value {
        json!({
            "id": id,
            "url": self.url("dcim/device-types", id),
            "display": model,
            "model": model,
            "manufacturer": manufacturer,
        })
    }

    /// Helper to create a prefix
    pub fn create_prefix(&self, id: u64, prefix: &str, vrf: Value, site: Value, tenant: Value) -> Value {
        json!({
            "id": id,
            "url": self.url("ipam/prefixes", id),
            "display": prefix,
            "family": { "value": 4, "label": "IPv4" },
            "prefix": prefix,
            "vrf": vrf,
            "site": site,
            "tenant": tenant,
            "status": { "value": "active", "label": "Active" },
            "description": "",
            "tags": [],
        })
    }

    /// Helper to create a device stub as embedded in an interface
    pub fn create_nested_device(&self, id: u64, name: &str) -> Value {
        self.nested("dcim/devices", id, name)
    }

    /// Helper to create a virtual machine stub as embedded in an interface
    pub fn create_nested_virtual_machine(&self, id: u64, name: &str) -> Value {
        self.nested("virtualization/virtual-machines", id, name)
    }

    /// Helper to create a device interface bound to `device`
    pub fn create_interface(&self, id: u64, name: &str, device: Value) -> Value {
        let mut interface = self.nested("dcim/interfaces", id, name);
        interface["device"] = device;
        interface
    }

    /// Helper to create a VM interface bound to `virtual_machine`
    pub fn create_vm_interface(&self, id: u64, name: &str, virtual_machine: Value) -> Value {
        let mut interface = self.nested("virtualization/interfaces", id, name);
        interface["virtual_machine"] = virtual_machine;
        interface
    }

    /// Helper to create an IP address, optionally assigned to an interface
    pub fn create_ip_address(&self, id: u64, address: &str, assigned_object: Value) -> Value {
        json!({
            "id": id,
            "url": self.url("ipam/ip-addresses", id),
            "display": address,
            "address": address,
            "vrf": null,
            "tenant": null,
            "status": { "value": "active", "label": "Active" },
            "assigned_object": assigned_object,
            "dns_name": "",
            "description": "",
            "tags": [],
        })
    }

    /// Helper to create a full device
    pub fn create_device(&self, id: u64, name: &str, site: Value, role: Value, device_type: Value) -> Value {
        let mut device = self.nested("dcim/devices", id, name);
        device["site"] = site;
        device["role"] = role;
        device["device_type"] = device_type;
        device["cluster"] = Value::Null;
        device["tenant"] = Value::Null;
        device["status"] = json!({ "value": "active", "label": "Active" });
        device
    }

    /// Helper to create a full virtual machine
    pub fn create_virtual_machine(&self, id: u64, name: &str, site: Value, cluster: Value) -> Value {
        let mut vm = self.nested("virtualization/virtual-machines", id, name);
        vm["site"] = site;
        vm["cluster"] = cluster;
        vm["role"] = Value::Null;
        vm["status"] = json!({ "value": "active", "label": "Active" });
        vm
    }

    /// Helper to create a service bound to a device or virtual machine
    pub fn create_service(&self, id: u64, name: &str, ports: &[u16]) -> Value {
        let mut service = self.nested("ipam/services", id, name);
        service["protocol"] = json!({ "value": "tcp", "label": "TCP" });
        service["ports"] = json!(ports);
        service
    }
}
