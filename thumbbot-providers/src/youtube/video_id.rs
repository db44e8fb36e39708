//! Video id extraction.

use regex::Regex;
use std::sync::LazyLock;
use thumbbot_fetch::FetchError;
use url::Url;

/// Canonical watch page prefix.
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const SHORT_LINK_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"));

static FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/)([A-Za-z0-9_-]{11})")
        .expect("Invalid regex")
});

/// Returns true for a well-formed 11-character id.
pub fn is_valid_video_id(id: &str) -> bool {
    VIDEO_ID_RE.is_match(id)
}

/// Extracts the video id from a watch, short, embed or shorts link.
pub fn extract_video_id(url: &Url) -> Result<String, FetchError> {
    let path = url.path();

    let candidate = if url.host_str().is_some_and(|h| SHORT_LINK_HOSTS.contains(&h)) {
        path.trim_start_matches('/').split('/').next().map(str::to_string)
    } else if path.contains("/watch") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else {
        segment_after(path, "/embed/").or_else(|| segment_after(path, "/shorts/"))
    };

    if let Some(id) = candidate.filter(|id| is_valid_video_id(id)) {
        return Ok(id);
    }

    FALLBACK_RE
        .captures(url.as_str())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FetchError::VideoIdNotFound(url.to_string()))
}

/// Returns the canonical watch URL for a video id.
pub fn canonical_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

fn segment_after(path: &str, marker: &str) -> Option<String> {
    let (_, rest) = path.split_once(marker)?;
    rest.split('/').next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(link: &str) -> Result<String, FetchError> {
        extract_video_id(&Url::parse(link).unwrap())
    }

    #[test]
    fn test_link_shapes() {
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(id("https://youtube.com/shorts/aBcDeFgHiJk").unwrap(), "aBcDeFgHiJk");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(matches!(
            id("https://www.youtube.com/watch?v=short"),
            Err(FetchError::VideoIdNotFound(_))
        ));
        assert!(id("https://www.youtube.com/channel/UC123").is_err());
        assert!(id("https://youtu.be/").is_err());
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(canonical_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
