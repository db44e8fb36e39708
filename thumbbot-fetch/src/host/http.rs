//! HTTP client with tracing and redirect control.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A second client that never follows redirects, for short-link expansion
//! - Convenience methods for the request shapes adapters need

use reqwest::{Client, Response, header, header::HeaderMap, redirect};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for thumbbot.
const USER_AGENT: &str = concat!("thumbbot/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper shared by all adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    no_redirect: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This only happens when
    /// the TLS backend cannot initialize. Use [`HttpClient::try_with_timeout`]
    /// to handle that case.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::try_with_timeout(timeout).unwrap_or_else(|e| {
            panic!(
                "Failed to create HTTP client: {e}. \
                This usually indicates a broken TLS/SSL configuration."
            )
        })
    }

    /// Creates a new HTTP client with a custom timeout, reporting build failures.
    pub fn try_with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let no_redirect = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { inner, no_redirect })
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with custom headers.
    ///
    /// Redirects are followed; `response.url()` is the final location.
    #[instrument(skip(self, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Response, HttpError> {
        debug!("GET request with headers");

        let response = self.inner.get(url).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Issues a HEAD request without following redirects and returns the
    /// `Location` header.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn head_location(&self, url: &str) -> Result<String, HttpError> {
        debug!("HEAD request");

        let response = self.no_redirect.head(url).send().await?;
        debug!(status = %response.status(), "Response received");

        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| HttpError::MissingLocation(url.to_string()))
    }

    /// Performs a POST request with form data and custom headers.
    #[instrument(skip(self, headers, form), fields(url = %url))]
    pub async fn post_form_with_headers<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        form: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with form data");

        let response = self.inner.post(url).headers(headers).form(form).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Header Helpers
// ============================================================================

/// Builds a header map from static name/value pairs.
pub fn header_map<'a>(
    pairs: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = header::HeaderValue::from_str(value)
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(header::HeaderName::from_static(name), value);
    }
    Ok(headers)
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    ///
    /// Both 429 and 403 count: the GraphQL endpoint answers 403 once the
    /// anti-forgery token goes stale under load.
    fn is_rate_limited(&self) -> bool;

    /// Get the positive Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        matches!(
            self.status(),
            reqwest::StatusCode::TOO_MANY_REQUESTS | reqwest::StatusCode::FORBIDDEN
        )
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .filter(|secs| *secs > 0)
    }
}

// ============================================================================
// Tests
// ============================================================================
