//! Media types.
//!
//! - [`MediaItem`] - normalized photo or video regardless of source platform
//! - [`VariantCandidate`] - one encoded quality of a video, input to variant selection

use serde::{Deserialize, Serialize};

// ============================================================================
// Media Kind
// ============================================================================

/// Whether a media item is a still image or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Photo,
    /// Video (including animated GIFs served as MP4).
    Video,
}

impl MediaKind {
    /// Returns the lowercase name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

// ============================================================================
// Media Item
// ============================================================================

/// A single photo or video attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Photo or video.
    pub kind: MediaKind,
    /// Direct URL of the media.
    pub url: String,
    /// Preview image for videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Video duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Video view count when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl MediaItem {
    /// Creates a photo item.
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Photo,
            url: url.into(),
            thumbnail_url: None,
            duration_secs: None,
            view_count: None,
        }
    }

    /// Creates a video item.
    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::photo(url)
        }
    }

    /// Sets the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url.filter(|t| !t.is_empty());
        self
    }

    /// Sets the duration in seconds.
    pub fn with_duration(mut self, duration_secs: Option<f64>) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Sets the view count.
    pub fn with_view_count(mut self, view_count: Option<u64>) -> Self {
        self.view_count = view_count;
        self
    }

    /// Returns true if this is a video.
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

// ============================================================================
// Variant Candidate
// ============================================================================

/// One encoded quality of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCandidate {
    /// Direct URL of this encoding.
    pub url: String,
    /// MIME type, e.g. `video/mp4`.
    #[serde(default)]
    pub content_type: String,
    /// Bitrate in bits per second; absent for playlists.
    #[serde(default)]
    pub bitrate_bps: Option<u64>,
}

impl VariantCandidate {
    /// Creates a candidate.
    pub fn new(url: impl Into<String>, content_type: impl Into<String>, bitrate_bps: Option<u64>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.into(),
            bitrate_bps,
        }
    }
}
