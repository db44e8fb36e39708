//! YouTube fetch strategy.

use async_trait::async_trait;
use reqwest::StatusCode;
use thumbbot_core::{PostResult, ProviderKind, ResolvedContent};
use thumbbot_fetch::{FetchContext, FetchError, FetchKind, FetchResult, FetchStrategy};
use tracing::{debug, instrument};
use url::Url;

use super::parser::{parse_oembed_response, scrape_description};
use super::video_id::{canonical_url, extract_video_id};

const YOUTUBE_BASE: &str = "https://www.youtube.com";

/// oEmbed lookup plus a best-effort description scrape.
pub struct YouTubeOEmbedStrategy {
    oembed_base: String,
    web_base: String,
}

impl YouTubeOEmbedStrategy {
    /// Creates a strategy against the public site.
    pub fn new() -> Self {
        Self {
            oembed_base: YOUTUBE_BASE.to_string(),
            web_base: YOUTUBE_BASE.to_string(),
        }
    }

    /// Points the oEmbed lookup at another base.
    pub fn with_oembed_base(mut self, base: impl Into<String>) -> Self {
        self.oembed_base = base.into();
        self
    }

    /// Points the description scrape at another base.
    pub fn with_web_base(mut self, base: impl Into<String>) -> Self {
        self.web_base = base.into();
        self
    }

    async fn fetch_oembed(&self, ctx: &FetchContext, canonical: &str) -> Result<PostResult, FetchError> {
        let endpoint = Url::parse_with_params(
            &format!("{}/oembed", self.oembed_base.trim_end_matches('/')),
            &[("url", canonical), ("format", "json")],
        )?;

        let response = ctx.http.get(endpoint.as_str()).await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(FetchError::upstream(status.as_u16(), body));
        }

        parse_oembed_response(&body, canonical)
    }

    /// Never fails; a missing description is simply empty.
    async fn fetch_description(&self, ctx: &FetchContext, video_id: &str) -> Option<String> {
        let url = format!("{}/watch?v={video_id}", self.web_base.trim_end_matches('/'));

        let response = match ctx.http.get(&url).await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), "Watch page unavailable");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "Watch page request failed");
                return None;
            }
        };

        let html = response.text().await.ok()?;
        scrape_description(&html)
    }
}

impl Default for YouTubeOEmbedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchStrategy for YouTubeOEmbedStrategy {
    fn id(&self) -> &str {
        "youtube.oembed"
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::YouTube
    }

    fn kind(&self) -> FetchKind {
        FetchKind::OEmbed
    }

    #[instrument(skip(self, ctx), fields(link = %link))]
    async fn fetch(&self, ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
        let video_id = extract_video_id(link)?;
        let canonical = canonical_url(&video_id);
        debug!(video_id = %video_id, "Fetching video via oEmbed");

        let mut post = ctx.run_cancellable(self.fetch_oembed(ctx, &canonical)).await?;
        let description = ctx
            .run_cancellable(async { Ok(self.fetch_description(ctx, &video_id).await) })
            .await?;
        post.body_text = description.unwrap_or_default();

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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OEMBED_BODY: &str = r#"{
        "title": "Never Gonna Give You Up",
        "author_name": "Rick Astley",
        "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    }"#;

    fn link() -> Url {
        Url::parse("https://youtu.be/dQw4w9WgXcQ?si=abc").unwrap()
    }

    fn strategy(server: &MockServer) -> YouTubeOEmbedStrategy {
        YouTubeOEmbedStrategy::new()
            .with_oembed_base(server.uri())
            .with_web_base(server.uri())
    }

    async fn mock_oembed(server: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param("url", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(OEMBED_BODY))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_with_description() {
        let server = MockServer::start().await;
        mock_oembed(&server, 200).await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .and(query_param("v", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<meta name="description" content="The official video">"#,
            ))
            .mount(&server)
            .await;

        let result = strategy(&server).fetch(&FetchContext::new(), &link()).await.unwrap();
        let post = result.content.as_post().unwrap();
        assert_eq!(post.source_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(post.author_handle, "Rick Astley");
        assert_eq!(post.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(post.body_text, "The official video");
    }

    #[tokio::test]
    async fn test_description_failure_is_swallowed() {
        let server = MockServer::start().await;
        mock_oembed(&server, 200).await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = strategy(&server).fetch(&FetchContext::new(), &link()).await.unwrap();
        assert_eq!(result.content.as_post().unwrap().body_text, "");
    }

    #[tokio::test]
    async fn test_oembed_error() {
        let server = MockServer::start().await;
        mock_oembed(&server, 404).await;

        let err = strategy(&server).fetch(&FetchContext::new(), &link()).await.unwrap_err();
        assert!(matches!(err, FetchError::Upstream { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_oembed_non_ok_success_is_error() {
        let server = MockServer::start().await;
        mock_oembed(&server, 202).await;

        let err = strategy(&server).fetch(&FetchContext::new(), &link()).await.unwrap_err();
        assert!(matches!(err, FetchError::Upstream { status: 202, .. }));
    }

    #[tokio::test]
    async fn test_bad_video_id_makes_no_calls() {
        let server = MockServer::start().await;
        let link = Url::parse("https://www.youtube.com/feed/trending").unwrap();

        let err = strategy(&server).fetch(&FetchContext::new(), &link).await.unwrap_err();
        assert!(matches!(err, FetchError::VideoIdNotFound(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
