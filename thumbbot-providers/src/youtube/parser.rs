//! oEmbed payload and watch page description scraping.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thumbbot_core::{MediaItem, PostResult};
use thumbbot_fetch::FetchError;

use crate::decode::null_as_default;

// ============================================================================
// oEmbed
// ============================================================================

/// oEmbed response; only the fields a post needs.
#[derive(Debug, Default, Deserialize)]
pub struct OEmbedResponse {
    /// Video title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Channel name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    /// Channel URL.
    #[serde(default)]
    pub author_url: Option<String>,
    /// Preview image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Parses an oEmbed body into a post for the canonical URL.
pub fn parse_oembed_response(body: &str, canonical_url: &str) -> Result<PostResult, FetchError> {
    let response: OEmbedResponse = serde_json::from_str(body)?;

    let mut post = PostResult::new(canonical_url, response.author_name);
    post.title = Some(response.title).filter(|t| !t.is_empty());
    post.media = response
        .thumbnail_url
        .filter(|u| !u.is_empty())
        .map(MediaItem::photo)
        .into_iter()
        .collect();

    Ok(post)
}

// ============================================================================
// Description Scraping
// ============================================================================

static META_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+name=["']description["']\s+content=["']([^"']+)["']"#)
        .expect("Invalid regex")
});

static JSON_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""description"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

static SHORT_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""shortDescription"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

/// Pulls the description out of a watch page.
///
/// Tries the meta tag, then structured data, then the initial player state.
pub fn scrape_description(html: &str) -> Option<String> {
    [&*META_DESCRIPTION_RE, &*JSON_DESCRIPTION_RE, &*SHORT_DESCRIPTION_RE]
        .into_iter()
        .filter_map(|re| re.captures(html))
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str()))
        .find(|desc| !desc.is_empty())
}

/// Decodes the handful of entities and escapes found in descriptions.
pub fn decode_entities(raw: &str) -> String {
    const REPLACEMENTS: &[(&str, &str)] = &[
        ("&quot;", "\""),
        ("&apos;", "'"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
        ("&#39;", "'"),
        ("&nbsp;", " "),
        ("\\u0026", "&"),
        ("\\u003c", "<"),
        ("\\u003e", ">"),
    ];

    REPLACEMENTS
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to))
}
