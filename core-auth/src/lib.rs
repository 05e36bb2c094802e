//! # Authentication Module
//!
//! Shared OAuth 2.0 plumbing for the provider connectors.
//!
//! ## Overview
//!
//! - Semantic value types for credentials, codes, tokens, accounts and cursors
//! - Application credentials, optionally loaded from the environment
//! - Callback URI construction for a host and logical route
//! - Authorization URL building and authorization-code exchange

pub mod error;
pub mod oauth;
pub mod redirect;
pub mod types;

pub use error::{AuthError, Result};
pub use oauth::{build_authorization_url, AuthorizationCodeExchange};
pub use redirect::{HostRouteUriBuilder, RedirectUriBuilder};
pub use types::{
    AccessToken, AccountId, AuthorizationCode, ClientCredentials, ClientId, ClientSecret, Cursor,
    ProviderKind,
};
