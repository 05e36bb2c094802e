//! Error types for OAuth flows and credential handling

use thiserror::Error;

/// Authentication errors shared by every provider
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint could not be reached
    #[error("Network error during token exchange: {0}")]
    NetworkError(String),

    /// The token endpoint answered with a non-success status
    #[error("Authorization code rejected: {0}")]
    InvalidAuthCode(String),

    /// Token response body did not have the expected shape
    #[error("Failed to parse token response: {0}")]
    ParseError(String),

    /// Names the unset environment variable
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    /// Callback host cannot be turned into a redirect URI
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
