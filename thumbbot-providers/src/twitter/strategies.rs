//! Microblog fetch strategies.

use async_trait::async_trait;
use thumbbot_core::{ProviderKind, ResolvedContent};
use thumbbot_fetch::{FetchContext, FetchError, FetchKind, FetchResult, FetchStrategy};
use tracing::{debug, instrument};
use url::Url;

use super::fxtwitter::parse_fxtwitter_response;
use super::vxtwitter::parse_vxtwitter_response;
use crate::links::strip_query;

const FXTWITTER_API: &str = "https://api.fxtwitter.com";
const VXTWITTER_API: &str = "https://api.vxtwitter.com";

/// GETs `{api_base}{path}` and returns the body of a 2xx response.
async fn fetch_status_json(
    ctx: &FetchContext,
    api_base: &str,
    link: &Url,
) -> Result<String, FetchError> {
    let url = format!("{}{}", api_base.trim_end_matches('/'), link.path());
    let response = ctx.http.get(&url).await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::upstream(status.as_u16(), body));
    }
    Ok(body)
}

// ============================================================================
// FxTwitter
// ============================================================================

/// Primary microblog strategy backed by the FxTwitter API.
pub struct FxTwitterApiStrategy {
    api_base: String,
}

impl FxTwitterApiStrategy {
    /// Creates a new FxTwitter strategy.
    pub fn new() -> Self {
        Self {
            api_base: FXTWITTER_API.to_string(),
        }
    }

    /// Points the strategy at another API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl Default for FxTwitterApiStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchStrategy for FxTwitterApiStrategy {
    fn id(&self) -> &str {
        "fxtwitter.api"
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::FxTwitter
    }

    fn kind(&self) -> FetchKind {
        FetchKind::JsonApi
    }

    #[instrument(skip(self, ctx), fields(link = %link))]
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        debug!("Fetching post via FxTwitter");

        let body = ctx
            .run_cancellable(fetch_status_json(ctx, &self.api_base, link))
            .await?;
        let source_url = strip_query(link);
        let post = parse_fxtwitter_response(&body, source_url.as_str(), ctx.settings.size_budget)?;

        Ok(FetchResult::new(
            ResolvedContent::Post(post),
            self.provider(),
            self.id(),
            self.kind(),
        ))
    }

    fn priority(&self) -> u32 {
        100
    }
}

// ============================================================================
// VxTwitter
// ============================================================================

/// Fallback microblog strategy backed by the VxTwitter API.
pub struct VxTwitterApiStrategy {
    api_base: String,
}

impl VxTwitterApiStrategy {
    /// Creates a new VxTwitter strategy.
    pub fn new() -> Self {
        Self {
            api_base: VXTWITTER_API.to_string(),
        }
    }

    /// Points the strategy at another API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl Default for VxTwitterApiStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchStrategy for VxTwitterApiStrategy {
    fn id(&self) -> &str {
        "vxtwitter.api"
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::VxTwitter
    }

    fn kind(&self) -> FetchKind {
        FetchKind::JsonApi
    }

    #[instrument(skip(self, ctx), fields(link = %link))]
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        debug!("Fetching post via VxTwitter");

        let body = ctx
            .run_cancellable(fetch_status_json(ctx, &self.api_base, link))
            .await?;
        let source_url = strip_query(link);
        let post = parse_vxtwitter_response(&body, source_url.as_str())?;

        Ok(FetchResult::new(
            ResolvedContent::Post(post),
            self.provider(),
            self.id(),
            self.kind(),
        ))
    }

    fn priority(&self) -> u32 {
        50
    }
}

// ============================================================================
// Tests
// ============================================================================
