//! Error types for the Dropbox provider

use thiserror::Error;

/// Dropbox provider errors
///
/// Every variant except [`LimitExceeded`](DropboxError::LimitExceeded) is a
/// failed round trip to Dropbox and is reported by
/// [`is_transport_failure`](DropboxError::is_transport_failure).
#[derive(Error, Debug)]
pub enum DropboxError {
    /// The HTTP transport failed (connection, TLS, timeout)
    #[error(transparent)]
    Transport(#[from] bridge_traits::error::BridgeError),

    /// Token exchange failed
    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    /// API request returned a non-success status
    #[error("Dropbox API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Pagination stopped at the configured page bound
    #[error("Listing still had more pages after {max_pages} pages")]
    LimitExceeded { max_pages: u32 },
}

impl DropboxError {
    pub fn is_transport_failure(&self) -> bool {
        !matches!(self, DropboxError::LimitExceeded { .. })
    }
}

/// Result type for Dropbox operations
pub type Result<T> = std::result::Result<T, DropboxError>;
