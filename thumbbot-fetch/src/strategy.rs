//! Fetch strategy trait and types.
//!
//! A strategy represents one method of resolving a link on a platform.
//! Provider groups can have multiple strategies (primary API, fallback API)
//! that are tried in priority order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thumbbot_core::{ProviderKind, ResolvedContent};
use url::Url;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Fetch Kind
// ============================================================================

/// The kind of fetch mechanism a strategy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// Public JSON embed API (e.g. `api.fxtwitter.com`).
    JsonApi,
    /// Private GraphQL endpoint behind an anti-forgery token.
    GraphQl,
    /// oEmbed endpoint plus page scrape.
    OEmbed,
    /// Direct media download.
    Download,
}

impl FetchKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::JsonApi => "JSON API",
            Self::GraphQl => "GraphQL",
            Self::OEmbed => "oEmbed",
            Self::Download => "Download",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fetch Result
// ============================================================================

/// The result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The resolved post or clip.
    pub content: ResolvedContent,
    /// The provider that produced the content.
    pub provider: ProviderKind,
    /// The strategy that succeeded.
    pub strategy_id: String,
    /// The kind of fetch used.
    pub kind: FetchKind,
}

impl FetchResult {
    /// Creates a new fetch result.
    pub fn new(
        content: ResolvedContent,
        provider: ProviderKind,
        strategy_id: impl Into<String>,
        kind: FetchKind,
    ) -> Self {
        Self {
            content,
            provider,
            strategy_id: strategy_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Fetch Strategy Trait
// ============================================================================

/// A strategy for resolving a link into content.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct VocarooDownloadStrategy;
///
/// #[async_trait]
/// impl FetchStrategy for VocarooDownloadStrategy {
///     fn id(&self) -> &str {
///         "vocaroo.download"
///     }
///
///     fn provider(&self) -> ProviderKind {
///         ProviderKind::Vocaroo
///     }
///
///     fn kind(&self) -> FetchKind {
///         FetchKind::Download
///     }
///
///     async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
///         let response = ctx.http.get(link.as_str()).await?;
///         // Buffer body and return FetchResult
///     }
/// }
/// ```
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "fxtwitter.api").
    ///
    /// Format: `{provider}.{method}`
    fn id(&self) -> &str;

    /// The provider whose content this strategy produces.
    fn provider(&self) -> ProviderKind;

    /// The kind of fetch this strategy uses.
    fn kind(&self) -> FetchKind;

    /// Human-readable name for this strategy.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Check if this strategy can handle the link at all.
    ///
    /// This must not touch the network.
    fn is_available(&self, _link: &Url) -> bool {
        true
    }

    /// Resolve the (query-stripped) link.
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError>;

    /// Whether to try the next strategy if this one fails with the given error.
    fn should_fallback(&self, error: &FetchError) -> bool {
        !error.is_cancelled()
    }

    /// Priority of this strategy (higher = try first).
    fn priority(&self) -> u32 {
        50
    }
}

// ============================================================================
// Strategy Info
// ============================================================================

/// Information about a strategy (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy ID.
    pub id: String,
    /// Provider the strategy produces.
    pub provider: ProviderKind,
    /// Strategy kind.
    pub kind: FetchKind,
    /// Priority.
    pub priority: u32,
}

impl StrategyInfo {
    /// Creates strategy info from a strategy implementation.
    pub fn from_strategy(strategy: &dyn FetchStrategy) -> Self {
        Self {
            id: strategy.id().to_string(),
            provider: strategy.provider(),
            kind: strategy.kind(),
            priority: strategy.priority(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_kind_display() {
        assert_eq!(FetchKind::JsonApi.display_name(), "JSON API");
        assert_eq!(FetchKind::GraphQl.to_string(), "GraphQL");
    }

    #[test]
    fn test_fetch_kind_serde() {
        let json = serde_json::to_string(&FetchKind::OEmbed).unwrap();
        assert_eq!(json, "\"o_embed\"");
    }
}
