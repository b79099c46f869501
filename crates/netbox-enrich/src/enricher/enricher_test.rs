//! Unit tests for the Enricher against MockNetBoxClient

#[cfg(test)]
mod tests {
    use crate::enricher::{Enricher, IP_ADDRESSES_PATH, MANUFACTURERS_PATH, PREFIXES_PATH, SERVICES_PATH};
    use crate::matcher::UNIDENTIFIED;
    use crate::records::DeviceKind;
    use netbox_client::MockNetBoxClient;
    use serde_json::{json, Value};

    const IP: &str = "10.1.2.3";

    fn enricher(mock: &MockNetBoxClient, verbose: bool) -> Enricher {
        Enricher::new(Box::new(mock.clone()), verbose)
    }

    /// Core switch with full detail, reachable through an interface stub
    fn setup_device(mock: &MockNetBoxClient) {
        let h = mock.helpers();
        let device = h.create_device(
            7,
            "core-01",
            h.create_nested_site(1, "HQ"),
            h.display_stub("Core Switch"),
            h.create_nested_device_type(3, "MX204", h.create_manufacturer(2, "Juniper Networks")),
        );
        mock.add_object(&h.url("dcim/devices", 7), device);

        let interface = h.create_interface(40, "xe-0/0/0", h.create_nested_device(7, "core-01"));
        mock.add_collection(
            IP_ADDRESSES_PATH,
            &[("address", IP)],
            vec![h.create_ip_address(100, "10.1.2.3/24", interface)],
        );
        mock.add_collection(
            SERVICES_PATH,
            &[("device_id", "7")],
            vec![
                h.create_service(1, "dns", &[53]),
                h.create_service(2, "dns", &[53]),
                h.create_service(3, "http", &[80]),
            ],
        );
    }

    #[tokio::test]
    async fn test_vrf_end_to_end() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        mock.add_collection(
            PREFIXES_PATH,
            &[("contains", IP)],
            vec![
                h.create_prefix(1, "10.0.0.0/8", Value::Null, Value::Null, Value::Null),
                h.create_prefix(
                    2,
                    "10.1.2.0/24",
                    json!({ "id": 5, "name": "red" }),
                    h.display_stub("HQ"),
                    h.create_nested_tenant(8, "Acme Corp"),
                ),
            ],
        );

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert_eq!(
            summary.vrfs.to_value(),
            json!({
                "name": ["red"],
                "id": [5],
                "site": ["HQ"],
                "tenant": ["Acme Corp"],
                "url": [h.url("ipam/prefixes", 2)],
            })
        );
        assert!(summary.manuf.is_none());
    }

    #[tokio::test]
    async fn test_unassigned_addresses_yield_no_devices() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        mock.add_collection(
            IP_ADDRESSES_PATH,
            &[("address", IP)],
            vec![
                h.create_ip_address(1, "10.1.2.3/24", Value::Null),
                h.create_ip_address(2, "10.1.2.3/32", Value::Null),
            ],
        );

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert!(summary.devices.is_empty());
        assert_eq!(serde_json::to_value(&summary).expect("serializable")["devices"], json!({}));
        assert!(mock.requests_for(SERVICES_PATH).is_empty(), "no service lookups without devices");
    }

    #[tokio::test]
    async fn test_device_end_to_end() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        setup_device(&mock);

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert_eq!(
            summary.devices.to_value(),
            json!({
                "name": ["core-01"],
                "id": [7],
                "url": ["http://test-netbox/api/dcim/devices/7/"],
                "service": ["dns", "http"],
                "site": ["HQ"],
                "role": ["Core Switch"],
                "device_type": ["MX204"],
                "manufacturer": ["Juniper Networks"],
            })
        );
    }

    #[tokio::test]
    async fn test_requests_are_sequential_per_page() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        setup_device(&mock);

        enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                PREFIXES_PATH.to_string(),
                IP_ADDRESSES_PATH.to_string(),
                "/api/dcim/devices/7/".to_string(),
                SERVICES_PATH.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_falls_back_to_stub() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        let interface = h.create_vm_interface(
            50,
            "eth0",
            json!({
                "id": 9,
                "url": "http://netbox.internal/api/virtualization/virtual-machines/9/",
                "display": "vm-09",
            }),
        );
        mock.add_collection(IP_ADDRESSES_PATH, &[("address", IP)], vec![h.create_ip_address(1, IP, interface)]);
        mock.fail_at("/api/virtualization/virtual-machines/9/", 0);
        mock.add_collection(SERVICES_PATH, &[("virtual_machine_id", "9")], vec![h.create_service(1, "ssh", &[22])]);

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert_eq!(summary.devices.get("name"), Some(&[json!("vm-09")][..]));
        assert_eq!(summary.devices.get("id"), Some(&[json!(9)][..]));
        assert_eq!(summary.devices.get("service"), Some(&[json!("ssh")][..]));
        assert_eq!(
            mock.requests_for("/api/virtualization/virtual-machines/9/").len(),
            1,
            "detail fetch is attempted once, through the configured base URL"
        );
    }

    #[tokio::test]
    async fn test_virtual_machine_services_use_vm_filter() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        let vm = h.create_virtual_machine(9, "vm-09", h.create_nested_site(1, "DC1"), json!({ "display": "k8s" }));
        mock.add_object(&h.url("virtualization/virtual-machines", 9), vm);

        let enricher = enricher(&mock, false);
        let ip = h.create_ip_address(
            1,
            IP,
            h.create_vm_interface(50, "eth0", h.create_nested_virtual_machine(9, "vm-09")),
        );
        let record = enricher.resolve_device(&ip).await.expect("assigned to a VM");

        assert_eq!(record.cluster.as_deref(), Some("k8s"));
        assert_eq!(record.site.as_deref(), Some("DC1"));
        let services = mock.requests_for(SERVICES_PATH);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].param(DeviceKind::VirtualMachine.services_filter()), Some("9"));
        assert_eq!(services[0].param("device_id"), None);
    }

    #[tokio::test]
    async fn test_stub_without_url_is_used_directly() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let enricher = enricher(&mock, false);
        let ip = json!({ "assigned_object": { "device": { "id": 3, "display": "leaf-03" } } });

        let record = enricher.resolve_device(&ip).await.expect("assigned to a device");

        assert_eq!(record.name.as_deref(), Some("leaf-03"));
        assert_eq!(mock.requests_for("/api/dcim/devices/3/").len(), 0);
        assert_eq!(mock.requests_for(SERVICES_PATH)[0].param("device_id"), Some("3"));
    }

    #[tokio::test]
    async fn test_duplicate_devices_are_preserved() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        let interface = h.create_interface(40, "eth0", json!({ "id": 4, "display": "fw-04" }));
        mock.add_collection(
            IP_ADDRESSES_PATH,
            &[("address", IP)],
            vec![
                h.create_ip_address(1, "10.1.2.3/24", interface.clone()),
                h.create_ip_address(2, "10.1.2.3/32", interface),
            ],
        );

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert_eq!(summary.devices.get("name"), Some(&[json!("fw-04"), json!("fw-04")][..]));
    }

    #[tokio::test]
    async fn test_verbose_attaches_details() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        setup_device(&mock);
        let h = mock.helpers();
        mock.add_collection(
            PREFIXES_PATH,
            &[("contains", IP)],
            vec![h.create_prefix(2, "10.1.2.0/24", h.create_nested_vrf(5, "red"), Value::Null, Value::Null)],
        );

        let summary = enricher(&mock, true).run(Some(IP), None).await.expect("run succeeds");

        let vrf_details = summary.vrfs.get("details").expect("vrf details present");
        assert_eq!(vrf_details[0]["prefix"], "10.1.2.0/24");
        assert!(vrf_details[0].get("tags").is_none(), "empty values are pruned from details too");
        let device_details = summary.devices.get("details").expect("device details present");
        assert_eq!(device_details[0]["name"], "core-01");
    }

    #[tokio::test]
    async fn test_prefix_failure_keeps_other_stages() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        setup_device(&mock);
        mock.fail_at(PREFIXES_PATH, 0);

        let summary = enricher(&mock, false).run(Some(IP), None).await.expect("run succeeds");

        assert!(summary.vrfs.is_empty());
        assert_eq!(summary.devices.get("name"), Some(&[json!("core-01")][..]));
    }

    #[tokio::test]
    async fn test_manufacturer_match() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let h = mock.helpers();
        let mut manufacturers: Vec<Value> = (0..60)
            .map(|i| h.create_manufacturer(100 + i, &format!("Vendor {:02}", i)))
            .collect();
        manufacturers.push(h.create_manufacturer(1, "Cisco Systems"));
        manufacturers.push(h.create_manufacturer(2, "Juniper Networks"));
        mock.add_collection(MANUFACTURERS_PATH, &[], manufacturers);

        let summary = enricher(&mock, false).run(Some(IP), Some("cisco")).await.expect("run succeeds");

        let manuf = summary.manuf.expect("manufacturer requested");
        assert_eq!(manuf.name, "Cisco Systems");
        assert_eq!(manuf.id, Some(1));
        assert_eq!(mock.requests_for(MANUFACTURERS_PATH).len(), 2, "second page holds the match");
    }

    #[tokio::test]
    async fn test_manufacturer_unreachable_is_unidentified() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.fail_at(MANUFACTURERS_PATH, 0);

        let summary = enricher(&mock, false).run(None, Some("cisco")).await.expect("run succeeds");

        let document = serde_json::to_value(&summary).expect("serializable");
        assert_eq!(document["manuf"], json!({ "name": UNIDENTIFIED, "match": 0.0 }));
    }

    #[tokio::test]
    async fn test_without_ip_queries_are_unfiltered() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection(PREFIXES_PATH, &[], Vec::new());
        mock.add_collection(IP_ADDRESSES_PATH, &[], Vec::new());

        let summary = enricher(&mock, false).run(None, None).await.expect("run succeeds");

        let document = serde_json::to_value(&summary).expect("serializable");
        assert_eq!(document, json!({ "vrfs": {}, "devices": {} }));
        let prefix_request = &mock.requests_for(PREFIXES_PATH)[0];
        assert_eq!(prefix_request.param("contains"), None);
    }
}
