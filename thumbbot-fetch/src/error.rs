//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for link classification and adapter operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The link could not be parsed as a URL.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The link parsed but carries no post shortcode or clip id.
    #[error("Shortcode not found in {0}")]
    ShortcodeNotFound(String),

    /// The link parsed but carries no video id.
    #[error("Video id not found in {0}")]
    VideoIdNotFound(String),

    /// No anti-forgery token could be obtained.
    #[error("Credential acquisition failed: {0}")]
    CredentialAcquisition(String),

    /// Retry budget exhausted while rate limited.
    #[error("Rate limited after retries: {body}")]
    RateLimited {
        /// Body of the last rate-limited response.
        body: String,
    },

    /// Non-success status from the target platform.
    #[error("Upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status, or the status code embedded in the payload.
        status: u16,
        /// Response body or payload message.
        body: String,
    },

    /// Transport failure talking to the target platform.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed or unexpected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Valid link, but the content is not a supported post type.
    #[error("Unsupported post: {0}")]
    UnsupportedPost(String),

    /// The caller abandoned the operation.
    #[error("Cancelled")]
    Cancelled,

    /// Every strategy in a pipeline failed.
    #[error("All strategies failed")]
    AllStrategiesFailed,

    /// The pipeline has nothing that can handle the link.
    #[error("No strategy available: {0}")]
    NoStrategies(String),
}

impl FetchError {
    /// Creates an upstream error.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Returns true for errors caused by the remote platform (status or transport).
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Network(_))
    }

    /// Returns true if the operation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::MalformedUrl(err.to_string())
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Request(e) => FetchError::Network(e),
            HttpError::InvalidUrl(url) => FetchError::MalformedUrl(url),
            HttpError::MissingLocation(url) => {
                FetchError::upstream(0, format!("no Location header from {url}"))
            }
            HttpError::InvalidHeader(msg) => FetchError::Decode(msg),
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A redirect response without a usable `Location` header.
    #[error("Missing Location header for {0}")]
    MissingLocation(String),

    /// A header value could not be built.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

// ============================================================================
// Config Error
// ============================================================================

/// Error type for loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
