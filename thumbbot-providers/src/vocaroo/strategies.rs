//! Vocaroo download strategy.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thumbbot_core::{ClipStream, ProviderKind, ResolvedContent};
use thumbbot_fetch::{FetchContext, FetchError, FetchKind, FetchResult, FetchStrategy, header_map};
use tracing::{debug, instrument};
use url::Url;

use crate::links::strip_query;

/// Host serving the MP3 files.
pub const MEDIA_BASE: &str = "https://media1.vocaroo.com";

const REFERER: &str = "https://vocaroo.com/";

/// Returns the clip id: the first path segment of the query-stripped link.
pub fn clip_id(link: &Url) -> Result<String, FetchError> {
    let stripped = strip_query(link);
    let parts: Vec<&str> = stripped.path().split('/').collect();

    parts
        .get(1)
        .filter(|id| !id.is_empty())
        .map(|id| (*id).to_string())
        .ok_or_else(|| FetchError::ShortcodeNotFound(link.to_string()))
}

/// Downloads a clip into memory.
pub struct VocarooDownloadStrategy {
    media_base: String,
}

impl VocarooDownloadStrategy {
    /// Creates a strategy against the public media host.
    pub fn new() -> Self {
        Self {
            media_base: MEDIA_BASE.to_string(),
        }
    }

    /// Points the download at another media host.
    pub fn with_media_base(mut self, base: impl Into<String>) -> Self {
        self.media_base = base.into();
        self
    }

    async fn download(&self, ctx: &FetchContext, link: &Url, id: &str) -> Result<ClipStream, FetchError> {
        let url = format!("{}/mp3/{id}", self.media_base.trim_end_matches('/'));
        let headers = header_map([("referer", REFERER)])?;

        let response = ctx.http.get_with_headers(&url, headers).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::upstream(status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Clip downloaded");

        Ok(ClipStream {
            clip_id: id.to_string(),
            label: format!("Vocaroo {id}"),
            source_url: strip_query(link).to_string(),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

impl Default for VocarooDownloadStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchStrategy for VocarooDownloadStrategy {
    fn id(&self) -> &str {
        "vocaroo.download"
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Vocaroo
    }

    fn kind(&self) -> FetchKind {
        FetchKind::Download
    }

    #[instrument(skip(self, ctx), fields(link = %link))]
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        let id = clip_id(link)?;
        debug!(clip_id = %id, "Downloading clip");

        let clip = ctx.run_cancellable(self.download(ctx, link, &id)).await?;

        Ok(FetchResult::new(
            ResolvedContent::Clip(clip),
            self.provider(),
            self.id(),
            self.kind(),
        ))
    }

    fn priority(&self) -> u32 {
        100
    }
}
