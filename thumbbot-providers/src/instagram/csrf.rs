//! Anti-forgery token cache.
//!
//! The GraphQL endpoint rejects requests without a `csrftoken` obtained from
//! the landing page. Tokens are cached for ten minutes and dropped as soon as
//! the endpoint starts rate limiting.

use std::time::Duration;

use reqwest::Response;
use reqwest::header::SET_COOKIE;
use thumbbot_fetch::HttpClient;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use super::api::browser_headers;
use super::error::CsrfError;

/// Page that hands out the token cookie.
pub const LANDING_URL: &str = "https://www.instagram.com/";

/// How long an acquired token stays usable.
pub const CSRF_TTL: Duration = Duration::from_secs(10 * 60);

const COOKIE_NAME: &str = "csrftoken";

/// A token and the instant it stops being usable.
#[derive(Debug, Clone)]
struct CsrfCredential {
    token: String,
    expires_at: Instant,
}

impl CsrfCredential {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Cache for the anti-forgery token.
///
/// The mutex is held across acquisition, so concurrent callers share a
/// single landing page request.
#[derive(Debug)]
pub struct CsrfCache {
    slot: Mutex<Option<CsrfCredential>>,
    ttl: Duration,
    landing_url: String,
}

impl CsrfCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ttl: CSRF_TTL,
            landing_url: LANDING_URL.to_string(),
        }
    }

    /// Sets the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the page the token is read from.
    pub fn with_landing_url(mut self, url: impl Into<String>) -> Self {
        self.landing_url = url.into();
        self
    }

    /// Returns the live token, acquiring a fresh one when none is cached.
    #[instrument(skip(self, http))]
    pub async fn get(&self, http: &HttpClient) -> Result<String, CsrfError> {
        let mut slot = self.slot.lock().await;

        if let Some(credential) = slot.as_ref().filter(|c| c.is_live()) {
            return Ok(credential.token.clone());
        }

        let token = self.acquire(http).await?;
        *slot = Some(CsrfCredential {
            token: token.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        debug!(ttl_secs = self.ttl.as_secs(), "Cached CSRF token");
        Ok(token)
    }

    /// Returns the cached token without acquiring one.
    pub async fn cached(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.as_ref().filter(|c| c.is_live()).map(|c| c.token.clone())
    }

    /// Drops the cached token.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
        debug!("CSRF token invalidated");
    }

    async fn acquire(&self, http: &HttpClient) -> Result<String, CsrfError> {
        debug!(url = %self.landing_url, "Acquiring CSRF token");

        let response = http
            .get_with_headers(&self.landing_url, browser_headers()?)
            .await?;

        if !response.status().is_success() {
            return Err(CsrfError::LandingStatus(response.status().as_u16()));
        }

        token_from_response(&response).ok_or(CsrfError::TokenNotFound)
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, token: &str) {
        *self.slot.lock().await = Some(CsrfCredential {
            token: token.to_string(),
            expires_at: Instant::now() + self.ttl,
        });
    }
}

impl Default for CsrfCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Cookie Extraction
// ============================================================================

/// Reads the token from parsed cookies, falling back to raw headers.
pub fn token_from_response(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|c| c.name() == COOKIE_NAME && !c.value().is_empty())
        .map(|c| c.value().to_string())
        .or_else(|| {
            token_from_set_cookie(
                response
                    .headers()
                    .get_all(SET_COOKIE)
                    .iter()
                    .filter_map(|v| v.to_str().ok()),
            )
        })
}

/// Finds `csrftoken=<value>` at the start of a raw `Set-Cookie` header.
pub fn token_from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<String> {
    headers.into_iter().find_map(|raw| {
        let rest = raw.strip_prefix("csrftoken=")?;
        let value = rest.split(';').next().unwrap_or_default();
        (!value.is_empty()).then(|| value.to_string())
    })
}
