use thiserror::Error;

use crate::config::ConfigError;

/// Failure of a call against the marketplace backend.
///
/// Every variant is recoverable: the caller may retry once the cause
/// (connectivity, session token, deleted listing) is dealt with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Not authenticated: missing or expired session token")]
    Auth,

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Whether the same call may succeed later. No backend failure leaves
    /// the local favorites inconsistent, so all of them are.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Auth | ApiError::NotFound(_) | ApiError::Network(_) => true,
        }
    }

    /// Whether the user has to sign in again before a retry can succeed.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Auth)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum RoostError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RoostError>;
