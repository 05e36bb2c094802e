//! Error types for the Slack provider

use thiserror::Error;

/// Slack provider errors
#[derive(Error, Debug)]
pub enum SlackError {
    /// Token exchange failed (transport, status or body shape)
    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    /// Slack answered `ok: false`
    #[error("Slack API error: {0}")]
    ApiError(String),

    /// Response was `ok: true` but lacked a usable token
    #[error("Failed to parse Slack response: {0}")]
    ParseError(String),
}

/// Result type for Slack operations
pub type Result<T> = std::result::Result<T, SlackError>;
