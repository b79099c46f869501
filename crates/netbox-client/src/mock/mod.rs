//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! Collections are served with real offset/limit slicing, so pagination
//! behaves as it would against NetBox. Single objects are served by path.
//! Failures and raw (non-object) bodies can be injected per page, and every
//! request is recorded for later assertions.
//!
//! - `helpers.rs` - Builders for raw NetBox JSON objects

mod helpers;

pub use helpers::Helpers;

use crate::common::relative_path;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Base-relative path
    pub path: String,
    /// Query parameters in the order they were sent
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct Collection {
    filters: Vec<(String, String)>,
    items: Vec<Value>,
}

/// Mock NetBoxClient for testing
///
/// Cloning shares the underlying state, so a test can hand a clone to the
/// code under test and inspect [`MockNetBoxClient::requests`] afterwards.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    collections: Arc<Mutex<HashMap<String, Vec<Collection>>>>,
    objects: Arc<Mutex<HashMap<String, Value>>>,
    failures: Arc<Mutex<HashSet<(String, usize)>>>,
    raw_responses: Arc<Mutex<HashMap<(String, usize), Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status_failures: Arc<Mutex<u32>>,
    reject_token: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn same_filters(a: &[(String, String)], b: &[(String, String)]) -> bool {
    a.len() == b.len() && a.iter().all(|pair| b.contains(pair))
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collections: Arc::new(Mutex::new(HashMap::new())),
            objects: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            raw_responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            status_failures: Arc::new(Mutex::new(0)),
            reject_token: Arc::new(Mutex::new(false)),
        }
    }

    /// Fixture builders bound to this mock's base URL
    pub fn helpers(&self) -> Helpers {
        Helpers::new(self.base_url.clone())
    }

    /// Serve `items` from `path` when queried with exactly `filters`
    /// (ignoring `offset` and `limit`)
    pub fn add_collection(&self, path: &str, filters: &[(&str, &str)], items: Vec<Value>) {
        lock(&self.collections)
            .entry(relative_path(&self.base_url, path))
            .or_default()
            .push(Collection { filters: owned(filters), items });
    }

    /// Serve `object` for GET requests to `path_or_url`
    pub fn add_object(&self, path_or_url: &str, object: Value) {
        lock(&self.objects).insert(relative_path(&self.base_url, path_or_url), object);
    }

    /// Fail the request to `path` at `offset` (use 0 for single objects)
    pub fn fail_at(&self, path: &str, offset: usize) {
        lock(&self.failures).insert((relative_path(&self.base_url, path), offset));
    }

    /// Return `body` verbatim for the request to `path` at `offset`
    pub fn set_raw_response(&self, path: &str, offset: usize, body: Value) {
        lock(&self.raw_responses).insert((relative_path(&self.base_url, path), offset), body);
    }

    /// Make the next `count` status checks fail as if NetBox were down
    pub fn fail_status_checks(&self, count: u32) {
        *lock(&self.status_failures) = count;
    }

    /// Reject the token on status checks
    pub fn reject_token(&self) {
        *lock(&self.reject_token) = true;
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Requests seen so far for one path
    pub fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        let path = relative_path(&self.base_url, path);
        lock(&self.requests)
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    fn page(&self, path: &str, collection: &Collection, offset: usize, limit: usize) -> Value {
        let total = collection.items.len();
        let end = offset.saturating_add(limit).min(total);
        let results: Vec<Value> = collection
            .items
            .get(offset.min(total)..end)
            .map(<[Value]>::to_vec)
            .unwrap_or_default();
        let next = (end < total).then(|| {
            format!("{}{}?offset={}&limit={}", self.base_url, path, end, limit)
        });
        json!({
            "count": total,
            "next": next,
            "previous": null,
            "results": results,
        })
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        lock(&self.requests).push(RecordedRequest {
            path: "/api/status/".to_string(),
            query: Vec::new(),
        });

        if *lock(&self.reject_token) {
            return Err(NetBoxError::Authentication("Invalid token: 403 Forbidden".to_string()));
        }

        let mut remaining = lock(&self.status_failures);
        if *remaining > 0 {
            *remaining -= 1;
            return Err(NetBoxError::Api("Failed to validate token: 503 Service Unavailable".to_string()));
        }
        Ok(())
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, NetBoxError> {
        let path = relative_path(&self.base_url, path);
        let request = RecordedRequest { path: path.clone(), query: owned(query) };
        let offset = request
            .param("offset")
            .and_then(|o| o.parse::<usize>().ok())
            .unwrap_or(0);
        let limit = request
            .param("limit")
            .and_then(|l| l.parse::<usize>().ok())
            .unwrap_or(crate::common::query::PAGE_SIZE);
        let filters: Vec<(String, String)> = request
            .query
            .iter()
            .filter(|(k, _)| k != "offset" && k != "limit")
            .cloned()
            .collect();
        lock(&self.requests).push(request);

        if lock(&self.failures).contains(&(path.clone(), offset)) {
            return Err(NetBoxError::Api(format!("GET {} failed: 502 Bad Gateway", path)));
        }

        if let Some(body) = lock(&self.raw_responses).get(&(path.clone(), offset)) {
            return Ok(body.clone());
        }

        if let Some(object) = lock(&self.objects).get(&path) {
            return Ok(object.clone());
        }

        let collections = lock(&self.collections);
        match collections.get(&path) {
            Some(registered) => Ok(registered
                .iter()
                .find(|c| same_filters(&c.filters, &filters))
                .map(|c| self.page(&path, c, offset, limit))
                .unwrap_or_else(|| {
                    json!({ "count": 0, "next": null, "previous": null, "results": [] })
                })),
            None => Err(NetBoxError::NotFound(format!("Resource not found: {}", path))),
        }
    }
}
