//! Fetch context providing access to host APIs.
//!
//! The fetch context is passed to all strategies and provides unified
//! access to the shared HTTP client, fetch settings and the cancellation
//! token for the current unit of work.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::host::http::{DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::retry::RetryPolicy;
use crate::variant::DEFAULT_SIZE_BUDGET;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// Retry policy for rate-limited endpoints.
    pub retry: RetryPolicy,
    /// Largest video variant (in bytes) worth re-posting.
    pub size_budget: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            size_budget: DEFAULT_SIZE_BUDGET,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings with a custom retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Creates settings with a custom size budget.
    pub fn with_size_budget(mut self, bytes: u64) -> Self {
        self.size_budget = bytes;
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to fetch strategies.
///
/// Cloning is cheap: the HTTP client is shared and the cancellation token
/// is reference counted.
#[derive(Clone)]
pub struct FetchContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Fetch settings.
    pub settings: FetchSettings,
    /// Cancelled when the caller abandons the work.
    pub cancel: CancellationToken,
}

impl FetchContext {
    /// Creates a new fetch context with default settings.
    pub fn new() -> Self {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self {
            http: Arc::new(HttpClient::with_timeout(settings.timeout)),
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns a copy of this context bound to another cancellation token.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            http: Arc::clone(&self.http),
            settings: self.settings.clone(),
            cancel,
        }
    }

    /// Returns the effective timeout for fetch operations.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Returns true if the caller has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs `fut` unless the context is cancelled first.
    pub async fn run_cancellable<F, T>(&self, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(FetchError::Cancelled),
            result = fut => result,
        }
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Debug, Default)]
pub struct FetchContextBuilder {
    http: Option<Arc<HttpClient>>,
    cancel: Option<CancellationToken>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the cancellation token.
    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.settings.retry = retry;
        self
    }

    /// Sets the size budget in bytes.
    pub fn size_budget(mut self, bytes: u64) -> Self {
        self.settings.size_budget = bytes;
        self
    }

    /// Builds the fetch context.
    pub fn build(self) -> FetchContext {
        let timeout = self.settings.timeout;
        FetchContext {
            http: self
                .http
                .unwrap_or_else(|| Arc::new(HttpClient::with_timeout(timeout))),
            cancel: self.cancel.unwrap_or_default(),
            settings: self.settings,
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
    fn test_context_builder() {
        let ctx = FetchContext::builder()
            .timeout(Duration::from_secs(60))
            .retry(RetryPolicy::new(2))
            .size_budget(1024)
            .build();

        assert_eq!(ctx.settings.timeout, Duration::from_secs(60));
        assert_eq!(ctx.settings.retry.max_retries, 2);
        assert_eq!(ctx.settings.size_budget, 1024);
    }

    #[test]
    fn test_default_context() {
        let ctx = FetchContext::new();
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
        assert_eq!(ctx.settings.retry.max_retries, 5);
        assert_eq!(ctx.settings.size_budget, 20 * 1024 * 1024);
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn test_with_cancellation_shares_client() {
        let ctx = FetchContext::new();
        let token = CancellationToken::new();
        let bound = ctx.with_cancellation(token.clone());

        assert!(Arc::ptr_eq(&ctx.http, &bound.http));
        token.cancel();
        assert!(bound.is_cancelled());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_run_cancellable() {
        let ctx = FetchContext::new();
        let value = ctx.run_cancellable(async { Ok::<_, FetchError>(7) }).await;
        assert_eq!(value.unwrap(), 7);

        ctx.cancel.cancel();
        let value = ctx
            .run_cancellable(std::future::pending::<Result<(), FetchError>>())
            .await;
        assert!(matches!(value, Err(FetchError::Cancelled)));
    }
}
