//! Common utilities for NetBox API client
//!
//! Provides shared functionality used across all API modules.

pub mod query;

use reqwest::Url;

/// Build query string from filters
pub fn build_query_string(filters: &[(&str, &str)]) -> String {
    filters
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Reduce a NetBox URL to a path relative to `base_url`
///
/// NetBox hands out absolute `url` fields built from its own idea of the
/// host, which may differ from the URL the client was configured with (for
/// example behind a reverse proxy). The base URL is stripped when it is a
/// literal prefix; otherwise the path of the URL is taken and the base URL's
/// own path prefix (e.g. "/netbox") removed from it. Relative paths are
/// already relative to the base URL and are only given a leading slash.
pub fn relative_path(base_url: &str, target: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if !base.is_empty() {
        if let Some(rest) = strip_segment_prefix(target, base) {
            return with_leading_slash(rest);
        }
    }

    let Ok(url) = Url::parse(target) else {
        return with_leading_slash(target);
    };
    let path_and_query = match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    };

    let base_path = Url::parse(base)
        .map(|u| u.path().trim_end_matches('/').to_string())
        .unwrap_or_default();
    if !base_path.is_empty() {
        if let Some(rest) = strip_segment_prefix(&path_and_query, &base_path) {
            return with_leading_slash(rest);
        }
    }

    path_and_query
}

/// Strip `prefix` only when it ends on a path boundary
fn strip_segment_prefix<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = value.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')).then_some(rest)
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
