//! Post and clip types produced by adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;

// ============================================================================
// Post Result
// ============================================================================

/// Normalized post returned by every post adapter.
///
/// Captions are not built here; the messaging layer renders them from
/// `author_handle`, `body_text`, `like_count` and `repost_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    /// Canonical link to the post, query stripped.
    pub source_url: String,
    /// Handle of the author (screen name, username, channel name).
    pub author_handle: String,
    /// Display name of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Title, for platforms that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Post text or description.
    #[serde(default)]
    pub body_text: String,
    /// Number of likes.
    #[serde(default)]
    pub like_count: u64,
    /// Number of reposts.
    #[serde(default)]
    pub repost_count: u64,
    /// When the post was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Attached media in display order.
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl PostResult {
    /// Creates an empty post for the given source.
    pub fn new(source_url: impl Into<String>, author_handle: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            author_handle: author_handle.into(),
            ..Self::default()
        }
    }

    /// Returns true if the post has any media.
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }

    /// Returns true if the post has neither media nor text.
    pub fn is_empty(&self) -> bool {
        self.media.is_empty() && self.body_text.trim().is_empty()
    }
}

// ============================================================================
// Clip Stream
// ============================================================================

/// A fully buffered audio clip.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipStream {
    /// Identifier of the clip on its host.
    pub clip_id: String,
    /// Human label, e.g. `Vocaroo 1a2b3c`.
    pub label: String,
    /// Link the clip was shared as.
    pub source_url: String,
    /// MIME type reported by the host.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Raw clip bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ClipStream {
    /// Size of the buffered clip in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were received.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ClipStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipStream")
            .field("clip_id", &self.clip_id)
            .field("label", &self.label)
            .field("source_url", &self.source_url)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// ============================================================================
// Resolved Content
// ============================================================================

/// What an adapter produced for a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedContent {
    /// A post with text and media.
    Post(PostResult),
    /// An audio clip.
    Clip(ClipStream),
}

impl ResolvedContent {
    /// Returns the post, if this is one.
    pub fn as_post(&self) -> Option<&PostResult> {
        match self {
            Self::Post(post) => Some(post),
            Self::Clip(_) => None,
        }
    }

    /// Returns the clip, if this is one.
    pub fn as_clip(&self) -> Option<&ClipStream> {
        match self {
            Self::Clip(clip) => Some(clip),
            Self::Post(_) => None,
        }
    }

    /// Returns the source link of the content.
    pub fn source_url(&self) -> &str {
        match self {
            Self::Post(post) => &post.source_url,
            Self::Clip(clip) => &clip.source_url,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
