//! # Dropbox Provider
//!
//! OAuth login and incremental file listing against the Dropbox API v2.
//!
//! ## Overview
//!
//! This module provides:
//! - Authorization URL construction and code-for-token exchange
//! - Latest-cursor lookup for a full recursive listing
//! - Change feed pagination that follows `has_more` cursors in order
//! - Account display-name lookup

pub mod client;
pub mod connector;
pub mod error;
pub mod types;

pub use client::{
    AccountAccessToken, DropboxClient, DropboxConfig, FileFetchResult, PaginationLimit,
    UserDetails, DROPBOX_API_BASE, DROPBOX_AUTHORIZE_URL, OAUTH_CALLBACK_ROUTE,
};
pub use connector::HttpDropboxClient;
pub use error::{DropboxError, Result};
pub use types::FileEntry;
