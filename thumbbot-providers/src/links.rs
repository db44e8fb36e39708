//! Link extraction and URL normalization.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Pattern for an `http(s)` link running up to the next whitespace.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid regex"));

/// Returns every `http(s)` link in `text`, in order of appearance.
pub fn extract_links(text: &str) -> Vec<&str> {
    LINK_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Returns the first link in `text`, if any.
///
/// Only the first link of a message is ever resolved.
pub fn first_link(text: &str) -> Option<&str> {
    LINK_RE.find(text).map(|m| m.as_str())
}

/// Returns a copy of `url` without query string or fragment.
pub fn strip_query(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}

/// Strips the query from a raw media URL.
///
/// Unparsable input is cut at the first `?`.
pub fn strip_query_str(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => strip_query(&url).to_string(),
        Err(_) => raw.split('?').next().unwrap_or(raw).to_string(),
    }
}
