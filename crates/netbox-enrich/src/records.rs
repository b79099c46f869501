//! Canonical records extracted from raw NetBox objects.
//!
//! Records keep every field, using `None` for anything missing; pruning
//! happens later over the serialized form.

use crate::fields::{id_of, label, name_or_display, string_field, FieldRef};
use serde::Serialize;
use serde_json::Value;

/// A VRF that contains a prefix matching the searched address
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VrfRecord {
    pub name: Option<String>,
    pub id: Option<u64>,
    pub site: Option<String>,
    pub tenant: Option<String>,
    pub url: Option<String>,
    /// Raw prefix, verbose mode only
    pub details: Option<Value>,
}

impl VrfRecord {
    /// Build a record from a raw prefix; `None` when the prefix has no VRF
    ///
    /// Site and tenant come from the prefix. The URL is the prefix's own,
    /// falling back to the VRF's.
    pub fn from_prefix(prefix: &Value, verbose: bool) -> Option<Self> {
        let vrf = FieldRef::get(prefix, "vrf");
        if !vrf.is_present() {
            return None;
        }

        Some(Self {
            name: vrf.name_or_display(),
            id: vrf.id(),
            site: name_or_display(prefix, "site"),
            tenant: name_or_display(prefix, "tenant"),
            url: string_field(prefix, "url").or_else(|| vrf.url()),
            details: verbose.then(|| prefix.clone()),
        })
    }
}

/// Which kind of object an IP address is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Device,
    VirtualMachine,
}

impl DeviceKind {
    /// Field of an assigned interface that references the parent object
    pub fn interface_field(self) -> &'static str {
        match self {
            DeviceKind::Device => "device",
            DeviceKind::VirtualMachine => "virtual_machine",
        }
    }

    /// Services endpoint filter selecting this kind's services
    pub fn services_filter(self) -> &'static str {
        match self {
            DeviceKind::Device => "device_id",
            DeviceKind::VirtualMachine => "virtual_machine_id",
        }
    }

    /// Find the parent stub of an IP address's `assigned_object`
    ///
    /// A device reference takes precedence over a virtual machine reference.
    pub fn assigned_parent(ip_address: &Value) -> Option<(DeviceKind, &Value)> {
        let assigned = ip_address.get("assigned_object")?;
        [DeviceKind::Device, DeviceKind::VirtualMachine]
            .into_iter()
            .find_map(|kind| match assigned.get(kind.interface_field()) {
                Some(stub) if !stub.is_null() => Some((kind, stub)),
                _ => None,
            })
    }
}

/// The device or virtual machine holding the searched address
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub name: Option<String>,
    pub id: Option<u64>,
    pub url: Option<String>,
    pub service: Vec<String>,
    pub site: Option<String>,
    pub role: Option<String>,
    pub cluster: Option<String>,
    pub device_type: Option<String>,
    pub manufacturer: Option<String>,
    /// Raw device or virtual machine, verbose mode only
    pub details: Option<Value>,
}

impl DeviceRecord {
    /// Build a record from a resolved device or virtual machine object
    ///
    /// Older NetBox releases call the role `device_role`.
    pub fn from_object(object: &Value, service: Vec<String>, verbose: bool) -> Self {
        let device_type = FieldRef::get(object, "device_type");

        Self {
            name: label(object),
            id: id_of(object),
            url: string_field(object, "url"),
            service,
            site: name_or_display(object, "site"),
            role: name_or_display(object, "role")
                .or_else(|| name_or_display(object, "device_role")),
            cluster: name_or_display(object, "cluster"),
            device_type: device_type.name_or_display(),
            manufacturer: device_type.child("manufacturer").name_or_display(),
            details: verbose.then(|| object.clone()),
        }
    }
}

/// Best manufacturer guess for a vendor string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerMatch {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Jaro-Winkler similarity in [0, 1]
    #[serde(rename = "match")]
    pub score: f64,
}
