//! Query utilities for NetBox API
//!
//! Provides the offset/limit pagination loop shared by every collection
//! endpoint. Pages are requested strictly one after another; the visitor
//! finishes with each item (including any nested requests it makes) before
//! the next page is fetched.

use crate::netbox_trait::NetBoxClientTrait;
use serde_json::Value;
use tracing::{debug, warn};

/// Number of results requested per page
pub const PAGE_SIZE: usize = 50;

/// Receives each item of a paginated collection
#[async_trait::async_trait]
pub trait PageVisitor: Send {
    /// Handle one entry of a page's `results`
    async fn visit(&mut self, item: Value);
}

/// Adapts a plain closure to [`PageVisitor`]
#[derive(Debug)]
pub struct FnVisitor<F>(pub F);

#[async_trait::async_trait]
impl<F> PageVisitor for FnVisitor<F>
where
    F: FnMut(Value) + Send,
{
    async fn visit(&mut self, item: Value) {
        (self.0)(item);
    }
}

/// Outcome of a pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSummary {
    /// Pages successfully fetched
    pub pages: usize,
    /// Items handed to the visitor
    pub items: usize,
    /// False when the loop stopped on a failed fetch or a non-object body
    pub complete: bool,
}

/// Walk every page of a collection endpoint
///
/// Starts at `offset=0` with `limit=PAGE_SIZE` and advances `offset` by the
/// number of results each page returned. Stops after a short page, or early
/// when a fetch fails or the body is not a JSON object; whatever the visitor
/// already received is kept.
///
/// # Arguments
/// * `client` - NetBox client
/// * `path` - Collection path (e.g., "/api/ipam/prefixes/")
/// * `filters` - Filter parameters sent with every page
/// * `visitor` - Receives each result in order
pub async fn paginate<V: PageVisitor>(
    client: &dyn NetBoxClientTrait,
    path: &str,
    filters: &[(&str, &str)],
    visitor: &mut V,
) -> PageSummary {
    let mut summary = PageSummary::default();
    let mut offset = 0usize;
    let limit = PAGE_SIZE.to_string();

    loop {
        let offset_param = offset.to_string();
        let mut query: Vec<(&str, &str)> = filters.to_vec();
        query.push(("offset", &offset_param));
        query.push(("limit", &limit));

        debug!("Fetching page of {} at offset {}", path, offset);
        let body = match client.get_json(path, &query).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Stopping pagination of {} at offset {}: {}", path, offset, e);
                return summary;
            }
        };

        let Value::Object(mut page) = body else {
            warn!("Stopping pagination of {} at offset {}: response is not an object", path, offset);
            return summary;
        };
        summary.pages += 1;

        let results = match page.remove("results") {
            Some(Value::Array(results)) => results,
            _ => Vec::new(),
        };
        let returned = results.len();

        for item in results {
            visitor.visit(item).await;
        }
        summary.items += returned;
        offset += returned;

        if returned < PAGE_SIZE {
            summary.complete = true;
            return summary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNetBoxClient;
    use serde_json::json;

    fn numbered(count: usize) -> Vec<Value> {
        (0..count).map(|i| json!({ "id": i })).collect()
    }

    fn offsets(mock: &MockNetBoxClient, path: &str) -> Vec<String> {
        mock.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .filter_map(|r| r.param("offset").map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_paginate_walks_all_pages() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection("/api/dcim/manufacturers/", &[], numbered(120));

        let mut seen = Vec::new();
        let summary = paginate(&mock, "/api/dcim/manufacturers/", &[], &mut FnVisitor(|v: Value| seen.push(v))).await;

        assert_eq!(seen.len(), 120);
        assert_eq!(seen[0]["id"], 0);
        assert_eq!(seen[119]["id"], 119);
        assert_eq!(summary, PageSummary { pages: 3, items: 120, complete: true });
        assert_eq!(offsets(&mock, "/api/dcim/manufacturers/"), vec!["0", "50", "100"]);
    }

    #[tokio::test]
    async fn test_paginate_exact_multiple_fetches_trailing_empty_page() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection("/api/dcim/manufacturers/", &[], numbered(100));

        let mut count = 0;
        let summary = paginate(&mock, "/api/dcim/manufacturers/", &[], &mut FnVisitor(|_: Value| count += 1)).await;

        assert_eq!(count, 100);
        assert_eq!(summary.pages, 3);
        assert!(summary.complete);
        assert_eq!(offsets(&mock, "/api/dcim/manufacturers/"), vec!["0", "50", "100"]);
    }

    #[tokio::test]
    async fn test_paginate_sends_filters_and_limit() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection("/api/ipam/prefixes/", &[("contains", "10.0.0.1")], numbered(2));
        mock.add_collection("/api/ipam/prefixes/", &[("contains", "192.168.0.1")], numbered(7));

        let mut count = 0;
        paginate(&mock, "/api/ipam/prefixes/", &[("contains", "10.0.0.1")], &mut FnVisitor(|_: Value| count += 1)).await;

        assert_eq!(count, 2, "only the matching collection should be served");
        let request = &mock.requests()[0];
        assert_eq!(request.param("contains"), Some("10.0.0.1"));
        assert_eq!(request.param("limit"), Some("50"));
        assert_eq!(request.param("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_paginate_keeps_partial_results_on_failure() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection("/api/ipam/ip-addresses/", &[], numbered(130));
        mock.fail_at("/api/ipam/ip-addresses/", 50);

        let mut seen = Vec::new();
        let summary = paginate(&mock, "/api/ipam/ip-addresses/", &[], &mut FnVisitor(|v: Value| seen.push(v))).await;

        assert_eq!(seen.len(), 50, "first page should be kept");
        assert_eq!(summary, PageSummary { pages: 1, items: 50, complete: false });
        assert_eq!(offsets(&mock, "/api/ipam/ip-addresses/"), vec!["0", "50"], "no retry after failure");
    }

    #[tokio::test]
    async fn test_paginate_stops_on_non_object_body() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.add_collection("/api/ipam/services/", &[], numbered(60));
        mock.set_raw_response("/api/ipam/services/", 50, json!(["not", "an", "object"]));

        let mut count = 0;
        let summary = paginate(&mock, "/api/ipam/services/", &[], &mut FnVisitor(|_: Value| count += 1)).await;

        assert_eq!(count, 50);
        assert!(!summary.complete);
    }

    #[tokio::test]
    async fn test_paginate_missing_results_is_empty_page() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.set_raw_response("/api/ipam/services/", 0, json!({ "detail": "nothing here" }));

        let mut count = 0;
        let summary = paginate(&mock, "/api/ipam/services/", &[], &mut FnVisitor(|_: Value| count += 1)).await;

        assert_eq!(count, 0);
        assert_eq!(summary, PageSummary { pages: 1, items: 0, complete: true });
    }
}
