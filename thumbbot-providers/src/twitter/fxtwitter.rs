//! FxTwitter API payload and conversion.

use chrono::DateTime;
use serde::Deserialize;
use thumbbot_core::{MediaItem, PostResult, VariantCandidate};
use thumbbot_fetch::{FetchError, select_best_variant};
use tracing::debug;

use crate::decode::null_as_default;
use crate::links::strip_query_str;

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level FxTwitter response.
#[derive(Debug, Deserialize)]
pub struct FxResponse {
    /// Embedded status code; anything but 200 is an error.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    /// Status message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// The post, present when `code` is 200.
    #[serde(default)]
    pub tweet: Option<FxTweet>,
}

/// A post.
#[derive(Debug, Deserialize)]
pub struct FxTweet {
    /// Canonical post URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Post text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: FxAuthor,
    /// Like count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    /// Repost count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub retweets: u64,
    /// Unix seconds.
    #[serde(default)]
    pub created_timestamp: Option<i64>,
    /// Attached media.
    #[serde(default)]
    pub media: Option<FxMedia>,
}

/// Post author.
#[derive(Debug, Default, Deserialize)]
pub struct FxAuthor {
    /// Handle without `@`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_name: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Media container.
#[derive(Debug, Default, Deserialize)]
pub struct FxMedia {
    /// Every item in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub all: Vec<FxMediaItem>,
}

/// A single media item.
#[derive(Debug, Default, Deserialize)]
pub struct FxMediaItem {
    /// Original URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Preview image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Seconds, videos only.
    #[serde(default)]
    pub duration: Option<f64>,
    /// `photo`, `video` or `gif`.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Encoded qualities, videos only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<FxVariant>,
}

/// One encoded quality.
#[derive(Debug, Default, Deserialize)]
pub struct FxVariant {
    /// MIME type.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    /// Direct URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Bits per second, absent for playlists.
    #[serde(default)]
    pub bitrate: Option<u64>,
}

// ============================================================================
// Conversion
// ============================================================================

/// Parses an FxTwitter body into a post.
///
/// `source_url` is used when the payload carries no post URL.
pub fn parse_fxtwitter_response(
    body: &str,
    source_url: &str,
    size_budget: u64,
) -> Result<PostResult, FetchError> {
    let response: FxResponse = serde_json::from_str(body)?;

    if response.code != 200 {
        return Err(FetchError::upstream(
            u16::try_from(response.code).unwrap_or(0),
            response.message,
        ));
    }

    let tweet = response
        .tweet
        .ok_or_else(|| FetchError::Decode("missing tweet".to_string()))?;

    let source = tweet.url.as_deref().map_or_else(|| source_url.to_string(), strip_query_str);
    let mut post = PostResult::new(source, tweet.author.screen_name);
    post.author_name = tweet.author.name.filter(|n| !n.is_empty());
    post.body_text = tweet.text;
    post.like_count = tweet.likes;
    post.repost_count = tweet.retweets;
    post.published_at = tweet
        .created_timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0));
    post.media = tweet
        .media
        .unwrap_or_default()
        .all
        .iter()
        .filter_map(|item| best_media(item, size_budget))
        .collect();

    debug!(media = post.media.len(), "Parsed FxTwitter post");
    Ok(post)
}

/// Chooses what to re-post for one media item.
///
/// Videos pick the largest variant under the budget; when none fits the
/// thumbnail is sent as a photo instead.
pub fn best_media(item: &FxMediaItem, size_budget: u64) -> Option<MediaItem> {
    let is_video = matches!(item.kind.as_str(), "video" | "gif");
    let duration = item.duration.unwrap_or(0.0);

    if is_video && !item.variants.is_empty() {
        let candidates: Vec<VariantCandidate> = item
            .variants
            .iter()
            .map(|v| VariantCandidate::new(&v.url, &v.content_type, v.bitrate))
            .collect();

        if let Some(best) = select_best_variant(&candidates, duration, size_budget) {
            return Some(
                MediaItem::video(strip_query_str(&best.url))
                    .with_thumbnail(item.thumbnail_url.clone())
                    .with_duration(item.duration),
            );
        }
        if let Some(thumb) = item.thumbnail_url.as_deref().filter(|t| !t.is_empty()) {
            return Some(MediaItem::photo(strip_query_str(thumb)));
        }
    }

    match item.kind.as_str() {
        "photo" | "image" if !item.url.is_empty() => Some(MediaItem::photo(strip_query_str(&item.url))),
        "video" | "gif" if !item.url.is_empty() => Some(
            MediaItem::video(strip_query_str(&item.url))
                .with_thumbnail(item.thumbnail_url.clone())
                .with_duration(item.duration),
        ),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use thumbbot_core::MediaKind;
    use thumbbot_fetch::DEFAULT_SIZE_BUDGET;

    const SOURCE: &str = "https://x.com/jack/status/20";

    #[test]
    fn test_parse_text_post() {
        let json = r#"{
            "code": 200,
            "message": "OK",
            "tweet": {
                "url": "https://x.com/jack/status/20",
                "id": "20",
                "text": "just setting up my twttr",
                "author": {"screen_name": "jack", "name": "jack"},
                "likes": 300000,
                "retweets": 120000,
                "created_timestamp": 1142974214
            }
        }"#;

        let post = parse_fxtwitter_response(json, SOURCE, DEFAULT_SIZE_BUDGET).unwrap();
        assert_eq!(post.author_handle, "jack");
        assert_eq!(post.body_text, "just setting up my twttr");
        assert_eq!(post.like_count, 300_000);
        assert_eq!(post.repost_count, 120_000);
        assert_eq!(post.published_at.unwrap().timestamp(), 1_142_974_214);
        assert!(!post.has_media());
    }

    #[test]
    fn test_embedded_error_code() {
        let json = r#"{"code": 404, "message": "NOT_FOUND", "tweet": null}"#;
        let err = parse_fxtwitter_response(json, SOURCE, DEFAULT_SIZE_BUDGET).unwrap_err();
        assert!(matches!(err, FetchError::Upstream { status: 404, ref body } if body == "NOT_FOUND"));
    }

    #[test]
    fn test_video_picks_variant_and_strips_query() {
        let json = r#"{
            "code": 200,
            "message": "OK",
            "tweet": {
                "url": "https://x.com/a/status/1",
                "text": "clip",
                "author": {"screen_name": "a"},
                "media": {"all": [{
                    "type": "video",
                    "url": "https://video.twimg.com/orig.mp4",
                    "thumbnail_url": "https://pbs.twimg.com/thumb.jpg",
                    "duration": 10.0,
                    "variants": [
                        {"content_type": "application/x-mpegURL", "url": "https://video.twimg.com/pl.m3u8"},
                        {"content_type": "video/mp4", "bitrate": 832000, "url": "https://video.twimg.com/low.mp4?tag=12"},
                        {"content_type": "video/mp4", "bitrate": 2176000, "url": "https://video.twimg.com/high.mp4?tag=12"}
                    ]
                }]}
            }
        }"#;

        let post = parse_fxtwitter_response(json, SOURCE, DEFAULT_SIZE_BUDGET).unwrap();
        assert_eq!(post.media.len(), 1);
        assert_eq!(post.media[0].kind, MediaKind::Video);
        assert_eq!(post.media[0].url, "https://video.twimg.com/high.mp4");
        assert_eq!(post.media[0].duration_secs, Some(10.0));
    }

    #[test]
    fn test_oversized_video_degrades_to_thumbnail() {
        let item = FxMediaItem {
            kind: "video".to_string(),
            url: "https://video.twimg.com/orig.mp4".to_string(),
            thumbnail_url: Some("https://pbs.twimg.com/thumb.jpg".to_string()),
            duration: Some(600.0),
            variants: vec![FxVariant {
                content_type: "video/mp4".to_string(),
                url: "https://video.twimg.com/huge.mp4".to_string(),
                bitrate: Some(10_000_000),
            }],
        };

        let media = best_media(&item, DEFAULT_SIZE_BUDGET).unwrap();
        assert_eq!(media.kind, MediaKind::Photo);
        assert_eq!(media.url, "https://pbs.twimg.com/thumb.jpg");
    }

    #[test]
    fn test_oversized_video_without_thumbnail_keeps_original() {
        let item = FxMediaItem {
            kind: "video".to_string(),
            url: "https://video.twimg.com/orig.mp4".to_string(),
            duration: Some(600.0),
            variants: vec![FxVariant {
                content_type: "video/mp4".to_string(),
                url: "https://video.twimg.com/huge.mp4".to_string(),
                bitrate: Some(10_000_000),
            }],
            ..FxMediaItem::default()
        };

        let media = best_media(&item, DEFAULT_SIZE_BUDGET).unwrap();
        assert_eq!(media.kind, MediaKind::Video);
        assert_eq!(media.url, "https://video.twimg.com/orig.mp4");
    }

    #[test]
    fn test_unknown_media_type_skipped() {
        let item = FxMediaItem {
            kind: "poll".to_string(),
            url: "https://x.com/poll".to_string(),
            ..FxMediaItem::default()
        };
        assert!(best_media(&item, DEFAULT_SIZE_BUDGET).is_none());
    }
}
