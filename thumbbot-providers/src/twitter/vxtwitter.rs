//! VxTwitter API payload and conversion.

use chrono::DateTime;
use serde::Deserialize;
use thumbbot_core::{MediaItem, PostResult};
use thumbbot_fetch::FetchError;
use tracing::debug;

use crate::decode::null_as_default;
use crate::links::strip_query_str;

// ============================================================================
// API Response Types
// ============================================================================

/// VxTwitter response.
#[derive(Debug, Deserialize)]
pub struct VxResponse {
    /// Post text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Like count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    /// Repost count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub retweets: u64,
    /// Canonical post URL.
    #[serde(default, rename = "tweetURL")]
    pub tweet_url: Option<String>,
    /// Display name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Handle without `@`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_screen_name: String,
    /// Unix seconds.
    #[serde(default)]
    pub date_epoch: Option<i64>,
    /// Attached media.
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_extended: Vec<VxMedia>,
}

/// A media item.
#[derive(Debug, Deserialize)]
pub struct VxMedia {
    /// `image`, `video` or `gif`.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Direct URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Preview image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Milliseconds, videos only.
    #[serde(default)]
    pub duration_millis: Option<u64>,
}

// ============================================================================
// Conversion
// ============================================================================

/// Parses a VxTwitter body into a post.
#[allow(clippy::cast_precision_loss)]
pub fn parse_vxtwitter_response(body: &str, source_url: &str) -> Result<PostResult, FetchError> {
    let response: VxResponse = serde_json::from_str(body)?;

    let source = response
        .tweet_url
        .as_deref()
        .map_or_else(|| source_url.to_string(), strip_query_str);
    let mut post = PostResult::new(source, response.user_screen_name);
    post.author_name = response.user_name.filter(|n| !n.is_empty());
    post.body_text = response.text;
    post.like_count = response.likes;
    post.repost_count = response.retweets;
    post.published_at = response
        .date_epoch
        .and_then(|ts| DateTime::from_timestamp(ts, 0));

    post.media = response
        .media_extended
        .into_iter()
        .filter(|m| !m.url.is_empty())
        .filter_map(|m| {
            let url = strip_query_str(&m.url);
            match m.kind.as_str() {
                "video" | "gif" => Some(
                    MediaItem::video(url)
                        .with_thumbnail(m.thumbnail_url)
                        .with_duration(m.duration_millis.map(|ms| ms as f64 / 1000.0)),
                ),
                "image" | "photo" => Some(MediaItem::photo(url)),
                _ => None,
            }
        })
        .collect();

    debug!(media = post.media.len(), "Parsed VxTwitter post");
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbbot_core::MediaKind;

    #[test]
    fn test_parse_with_media() {
        let json = r#"{
            "text": "two things",
            "likes": 5,
            "retweets": 2,
            "tweetURL": "https://twitter.com/a/status/1",
            "user_name": "A",
            "user_screen_name": "a",
            "date_epoch": 1700000000,
            "media_extended": [
                {"type": "image", "url": "https://pbs.twimg.com/media/x.jpg?name=orig"},
                {"type": "video", "url": "https://video.twimg.com/v.mp4?tag=1", "thumbnail_url": "https://pbs.twimg.com/t.jpg", "duration_millis": 4500}
            ]
        }"#;

        let post = parse_vxtwitter_response(json, "https://x.com/a/status/1").unwrap();
        assert_eq!(post.source_url, "https://twitter.com/a/status/1");
        assert_eq!(post.author_handle, "a");
        assert_eq!(post.author_name.as_deref(), Some("A"));
        assert_eq!(post.media.len(), 2);
        assert_eq!(post.media[0].kind, MediaKind::Photo);
        assert_eq!(post.media[0].url, "https://pbs.twimg.com/media/x.jpg");
        assert_eq!(post.media[1].kind, MediaKind::Video);
        assert_eq!(post.media[1].url, "https://video.twimg.com/v.mp4");
        assert_eq!(post.media[1].duration_secs, Some(4.5));
    }

    #[test]
    fn test_text_only() {
        let json = r#"{"text": "hello", "user_screen_name": "a"}"#;
        let post = parse_vxtwitter_response(json, "https://x.com/a/status/1").unwrap();
        assert_eq!(post.source_url, "https://x.com/a/status/1");
        assert!(!post.has_media());
        assert_eq!(post.like_count, 0);
    }

    #[test]
    fn test_malformed() {
        let err = parse_vxtwitter_response("<html>", "https://x.com/a/status/1").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
