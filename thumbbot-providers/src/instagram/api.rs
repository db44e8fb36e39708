//! Instagram GraphQL client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thumbbot_core::PostResult;
use thumbbot_fetch::{FetchContext, FetchError, HttpError, ResponseExt, header_map, sleep_or_cancel};
use tracing::{debug, instrument, warn};

use super::csrf::CsrfCache;
use super::parser::parse_graphql_response;

// ============================================================================
// Constants
// ============================================================================

/// GraphQL query endpoint.
pub const GRAPHQL_URL: &str = "https://www.instagram.com/graphql/query";

/// Persisted query document for a single post by shortcode.
pub const DOC_ID: &str = "9510064595728286";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";
const SEC_CH_UA: &str = r#""Google Chrome";v="143", "Chromium";v="143", "Not A(Brand";v="24""#;
const SEC_CH_UA_FULL: &str =
    r#""Google Chrome";v="143.0.0.0", "Chromium";v="143.0.0.0", "Not A(Brand";v="24.0.0.0""#;
const IG_APP_ID: &str = "936619743392459";
const ASBD_ID: &str = "359341";

// ============================================================================
// Headers
// ============================================================================

/// Client hints shared by page and GraphQL requests.
const CLIENT_HINTS: &[(&str, &str)] = &[
    ("user-agent", BROWSER_USER_AGENT),
    ("accept-language", "en-US,en;q=0.9"),
    ("sec-ch-ua", SEC_CH_UA),
    ("sec-ch-ua-full-version-list", SEC_CH_UA_FULL),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-model", r#""""#),
    ("sec-ch-ua-platform", r#""macOS""#),
    ("sec-ch-ua-platform-version", r#""15.0.0""#),
    ("sec-ch-prefers-color-scheme", "dark"),
    ("priority", "u=1, i"),
];

/// Headers of a top-level page navigation.
pub fn browser_headers() -> Result<HeaderMap, HttpError> {
    let navigation = [
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
        ("upgrade-insecure-requests", "1"),
    ];

    let mut headers = header_map(CLIENT_HINTS.iter().copied())?;
    headers.extend(header_map(navigation)?);
    Ok(headers)
}

/// Headers of a same-origin GraphQL call carrying the token.
pub fn graphql_headers(csrf_token: &str) -> Result<HeaderMap, HttpError> {
    let cookie = format!("csrftoken={csrf_token}");
    let xhr = [
        ("accept", "*/*"),
        ("origin", "https://www.instagram.com"),
        ("referer", "https://www.instagram.com/"),
        ("x-csrftoken", csrf_token),
        ("cookie", cookie.as_str()),
        ("x-ig-app-id", IG_APP_ID),
        ("x-asbd-id", ASBD_ID),
        ("x-ig-www-claim", "0"),
        ("x-requested-with", "XMLHttpRequest"),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-origin"),
    ];

    let mut headers = header_map(CLIENT_HINTS.iter().copied())?;
    headers.extend(header_map(xhr)?);
    Ok(headers)
}

/// JSON `variables` form field for a shortcode query.
pub fn query_variables(shortcode: &str) -> String {
    serde_json::json!({
        "shortcode": shortcode,
        "fetch_tagged_user_count": null,
        "hoisted_comment_id": null,
        "hoisted_reply_id": null,
    })
    .to_string()
}

// ============================================================================
// Client
// ============================================================================

/// GraphQL client that retries through rate limiting.
#[derive(Debug, Clone)]
pub struct InstagramApiClient {
    graphql_url: String,
}

impl InstagramApiClient {
    /// Creates a client for the public endpoint.
    pub fn new() -> Self {
        Self {
            graphql_url: GRAPHQL_URL.to_string(),
        }
    }

    /// Points the client at another endpoint.
    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    /// Fetches one post by shortcode.
    ///
    /// On 429 or 403 the token is dropped and the request retried after a
    /// jittered exponential backoff, honoring `Retry-After` when positive.
    /// A 401 drops the token without retrying.
    #[instrument(skip(self, ctx, csrf))]
    pub async fn fetch_post(
        &self,
        ctx: &FetchContext,
        csrf: &CsrfCache,
        shortcode: &str,
        source_url: &str,
    ) -> Result<PostResult, FetchError> {
        let variables = query_variables(shortcode);
        let form = [("variables", variables.as_str()), ("doc_id", DOC_ID)];
        let mut backoff = ctx.settings.retry.backoff();

        loop {
            let token = csrf.get(&ctx.http).await?;
            let response = ctx
                .http
                .post_form_with_headers(&self.graphql_url, graphql_headers(&token)?, &form)
                .await?;

            let status = response.status();
            if response.is_rate_limited() {
                let retry_after = response.retry_after_secs().map(Duration::from_secs);
                let body = response.text().await.unwrap_or_default();
                csrf.invalidate().await;

                let Some(wait) = backoff.next_wait(retry_after) else {
                    warn!(status = status.as_u16(), "Rate limited, retries exhausted");
                    return Err(FetchError::RateLimited { body });
                };

                warn!(
                    status = status.as_u16(),
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    remaining = backoff.remaining(),
                    "Rate limited, backing off"
                );
                sleep_or_cancel(wait, &ctx.cancel).await?;
                continue;
            }

            let body = response.text().await?;
            if status == StatusCode::UNAUTHORIZED {
                warn!("Token rejected, dropping it");
                csrf.invalidate().await;
            }
            if !status.is_success() {
                return Err(FetchError::upstream(status.as_u16(), body));
            }

            debug!(bytes = body.len(), "GraphQL response received");
            return parse_graphql_response(&body, source_url);
        }
    }
}

impl Default for InstagramApiClient {
    fn default() -> Self {
        Self::new()
    }
}
