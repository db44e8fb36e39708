//! Instagram fetch strategy.

use std::sync::Arc;

use async_trait::async_trait;
use thumbbot_core::{ProviderKind, ResolvedContent};
use thumbbot_fetch::{FetchContext, FetchError, FetchKind, FetchResult, FetchStrategy};
use tracing::{debug, instrument};
use url::Url;

use super::api::{InstagramApiClient, browser_headers};
use super::csrf::CsrfCache;
use super::shortcode::{extract_shortcode, is_share_link, is_story};
use crate::links::strip_query;

/// GraphQL scrape of a single post or reel.
///
/// Owns the token cache; clones of the pipeline share it through the `Arc`.
pub struct InstagramGraphQlStrategy {
    api: InstagramApiClient,
    csrf: Arc<CsrfCache>,
}

impl InstagramGraphQlStrategy {
    /// Creates a strategy with a fresh token cache.
    pub fn new() -> Self {
        Self {
            api: InstagramApiClient::new(),
            csrf: Arc::new(CsrfCache::new()),
        }
    }

    /// Uses a shared token cache.
    pub fn with_csrf_cache(mut self, csrf: Arc<CsrfCache>) -> Self {
        self.csrf = csrf;
        self
    }

    /// Uses a custom API client.
    pub fn with_api(mut self, api: InstagramApiClient) -> Self {
        self.api = api;
        self
    }

    /// Returns the token cache.
    pub fn csrf_cache(&self) -> &Arc<CsrfCache> {
        &self.csrf
    }

    async fn fetch_post(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        let mut link = link.clone();
        if is_share_link(&link) {
            let response = ctx
                .http
                .get_with_headers(link.as_str(), browser_headers()?)
                .await?;
            link = response.url().clone();
            debug!(resolved = %link, "Followed share link");
        }

        let shortcode = extract_shortcode(link.path())?;
        let source_url = strip_query(&link);
        let post = self
            .api
            .fetch_post(ctx, &self.csrf, &shortcode, source_url.as_str())
            .await?;

        Ok(FetchResult::new(
            ResolvedContent::Post(post),
            self.provider(),
            self.id(),
            self.kind(),
        ))
    }
}

impl Default for InstagramGraphQlStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchStrategy for InstagramGraphQlStrategy {
    fn id(&self) -> &str {
        "instagram.graphql"
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Instagram
    }

    fn kind(&self) -> FetchKind {
        FetchKind::GraphQl
    }

    #[instrument(skip(self, ctx), fields(link = %link))]
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        if is_story(link) {
            return Err(FetchError::UnsupportedPost("stories are not supported".to_string()));
        }

        debug!("Fetching post via GraphQL");
        ctx.run_cancellable(self.fetch_post(ctx, link)).await
    }

    fn priority(&self) -> u32 {
        100
    }
}

// ============================================================================
// Tests
// ============================================================================
