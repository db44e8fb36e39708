//! Instagram-specific error types.

use thiserror::Error;
use thumbbot_fetch::{FetchError, HttpError};

/// Errors raised while acquiring the anti-forgery token.
#[derive(Debug, Error)]
pub enum CsrfError {
    /// The landing page request failed.
    #[error("Landing page request failed: {0}")]
    Landing(#[from] HttpError),

    /// The landing page answered with a non-success status.
    #[error("Landing page returned status {0}")]
    LandingStatus(u16),

    /// Neither parsed cookies nor raw `Set-Cookie` headers carried a token.
    #[error("CSRF token not found in response cookies")]
    TokenNotFound,
}

impl From<CsrfError> for FetchError {
    fn from(e: CsrfError) -> Self {
        FetchError::CredentialAcquisition(e.to_string())
    }
}
