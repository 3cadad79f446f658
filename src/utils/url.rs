// src/utils/url.rs

//! URL inspection helpers for problem links.

use url::Url;

/// Host of a URL string, if it parses.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}

/// Text after the last `/` of a URL, or `unknown` when that is empty.
///
/// # Examples
/// ```
/// use curriculum::utils::url::last_segment;
///
/// assert_eq!(last_segment("https://example.com/tasks/bridges.pdf"), "bridges.pdf");
/// assert_eq!(last_segment("https://example.com/tasks/"), "unknown");
/// ```
pub fn last_segment(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Value of a query parameter.
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Non-empty path segments of a URL.
pub fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}
