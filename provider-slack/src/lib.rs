//! # Slack Provider
//!
//! Exchanges a Slack OAuth v2 authorization code for an access token.

pub mod client;
pub mod error;

pub use client::{HttpSlackClient, SlackClient, SlackConfig, SlackTeam, SlackToken, SLACK_API_BASE};
pub use error::{Result, SlackError};
