//! GraphQL payload types and conversion to a post.

use serde::Deserialize;
use thumbbot_core::{MediaItem, PostResult};
use thumbbot_fetch::FetchError;
use tracing::debug;

use crate::decode::null_as_default;

/// `__typename` of multi-item posts.
const SIDECAR_TYPENAME: &str = "XDTGraphSidecar";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level GraphQL response.
#[derive(Debug, Default, Deserialize)]
pub struct GraphResponse {
    /// Query data, absent on errors.
    #[serde(default)]
    pub data: Option<GraphData>,
}

/// Query data.
#[derive(Debug, Default, Deserialize)]
pub struct GraphData {
    /// The post, `null` for anything the document cannot serve.
    #[serde(default)]
    pub xdt_shortcode_media: Option<MediaNode>,
}

/// A post or one child of a multi-item post.
#[derive(Debug, Default, Deserialize)]
pub struct MediaNode {
    /// GraphQL type name.
    #[serde(default, rename = "__typename", deserialize_with = "null_as_default")]
    pub typename: String,
    /// Post owner; empty on children.
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: Owner,
    /// Caption edges; the first one is the caption.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edge_media_to_caption: TextEdges,
    /// Like counter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edge_media_preview_like: Counter,
    /// Whether this node is a video.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_video: bool,
    /// Video URL.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Image URL, also the video poster.
    #[serde(default)]
    pub display_url: Option<String>,
    /// Video views.
    #[serde(default)]
    pub video_view_count: Option<u64>,
    /// Children of a multi-item post.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edge_sidecar_to_children: ChildEdges,
}

/// Post owner.
#[derive(Debug, Default, Deserialize)]
pub struct Owner {
    /// Handle.
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Caption edges.
#[derive(Debug, Default, Deserialize)]
pub struct TextEdges {
    /// Edges in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<TextEdge>,
}

/// One caption edge.
#[derive(Debug, Default, Deserialize)]
pub struct TextEdge {
    /// Edge payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub node: TextNode,
}

/// Caption text.
#[derive(Debug, Default, Deserialize)]
pub struct TextNode {
    /// Caption body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// A counter.
#[derive(Debug, Default, Deserialize)]
pub struct Counter {
    /// Count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Children of a multi-item post.
#[derive(Debug, Default, Deserialize)]
pub struct ChildEdges {
    /// Edges in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<ChildEdge>,
}

/// One child edge.
#[derive(Debug, Default, Deserialize)]
pub struct ChildEdge {
    /// Child node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub node: MediaNode,
}

// ============================================================================
// Conversion
// ============================================================================

/// Parses a GraphQL body into a post.
pub fn parse_graphql_response(body: &str, source_url: &str) -> Result<PostResult, FetchError> {
    let response: GraphResponse = serde_json::from_str(body)?;

    let node = response
        .data
        .and_then(|d| d.xdt_shortcode_media)
        .ok_or_else(|| {
            FetchError::UnsupportedPost("only posts and reels are supported".to_string())
        })?;

    Ok(node_to_post(node, source_url))
}

/// Shapes a top-level node into a post.
pub fn node_to_post(node: MediaNode, source_url: &str) -> PostResult {
    let media = if node.typename == SIDECAR_TYPENAME {
        node.edge_sidecar_to_children
            .edges
            .iter()
            .filter_map(|edge| media_item(&edge.node))
            .collect()
    } else {
        media_item(&node).into_iter().collect()
    };

    let mut post = PostResult::new(source_url, node.owner.username);
    post.author_name = node.owner.full_name.filter(|n| !n.is_empty());
    post.body_text = node
        .edge_media_to_caption
        .edges
        .into_iter()
        .next()
        .map(|e| e.node.text)
        .unwrap_or_default();
    post.like_count = node.edge_media_preview_like.count;
    post.media = media;

    debug!(media = post.media.len(), "Parsed Instagram post");
    post
}

/// Converts one node into a media item, or `None` without a usable URL.
fn media_item(node: &MediaNode) -> Option<MediaItem> {
    let display = node.display_url.clone().filter(|u| !u.is_empty());

    if node.is_video {
        let url = node.video_url.clone().filter(|u| !u.is_empty())?;
        Some(
            MediaItem::video(url)
                .with_thumbnail(display)
                .with_view_count(node.video_view_count),
        )
    } else {
        display.map(MediaItem::photo)
    }
}
