//! # Connector Configuration
//!
//! Builder-based configuration shared by the provider connectors.
//!
//! ## Overview
//!
//! `ConnectorConfig` holds the HTTP transport, per-provider application
//! credentials and the few tunables the connectors expose. Credentials are
//! injected here once and handed to each client's constructor; nothing below
//! this module reads the environment.
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ConnectorConfig;
//!
//! // DROPBOX_CLIENT_ID / DROPBOX_CLIENT_SECRET, SLACK_CLIENT_ID / SLACK_CLIENT_SECRET
//! let config = ConnectorConfig::from_env()
//!     .dropbox_max_pages(500)
//!     .build()?;
//! ```
//!
//! ```ignore
//! use core_auth::ClientCredentials;
//! use core_runtime::config::{CallbackScheme, ConnectorConfig};
//! use std::sync::Arc;
//!
//! let config = ConnectorConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .dropbox_credentials(ClientCredentials::new("app-key", "app-secret"))
//!     .callback_scheme(CallbackScheme::Http)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::http::HttpClient;
use core_auth::{AuthError, ClientCredentials, HostRouteUriBuilder, ProviderKind, RedirectUriBuilder};
use std::sync::Arc;
use tracing::debug;

/// Environment variable holding the redirect URI sent with Slack token exchanges.
pub const SLACK_REDIRECT_URI_VAR: &str = "SLACK_REDIRECT_URI";

/// Scheme used when building OAuth callback URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackScheme {
    #[default]
    Https,
    /// Plain HTTP, for local development hosts such as `localhost:8080`
    Http,
}

impl CallbackScheme {
    fn uri_builder(self) -> HostRouteUriBuilder {
        match self {
            CallbackScheme::Https => HostRouteUriBuilder::https(),
            CallbackScheme::Http => HostRouteUriBuilder::http(),
        }
    }
}

/// Configuration shared by the provider connectors.
///
/// Use [`ConnectorConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ConnectorConfig {
    pub http_client: Arc<dyn HttpClient>,

    /// Builds `<scheme>://<host>/<route>` callback URIs
    pub redirect_uri_builder: Arc<dyn RedirectUriBuilder>,

    pub dropbox_credentials: Option<ClientCredentials>,

    /// Upper bound on list-folder pages per fetch; `None` follows the
    /// cursor chain until `has_more` is false
    pub dropbox_max_pages: Option<u32>,

    pub slack_credentials: Option<ClientCredentials>,

    pub slack_redirect_uri: Option<String>,
}

impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("http_client", &"HttpClient { ... }")
            .field("redirect_uri_builder", &"RedirectUriBuilder { ... }")
            .field("dropbox_credentials", &self.dropbox_credentials)
            .field("dropbox_max_pages", &self.dropbox_max_pages)
            .field("slack_credentials", &self.slack_credentials)
            .field("slack_redirect_uri", &self.slack_redirect_uri)
            .finish()
    }
}

impl ConnectorConfig {
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::default()
    }

    /// Builder preloaded from the process environment.
    ///
    /// Reads `DROPBOX_CLIENT_ID` / `DROPBOX_CLIENT_SECRET`,
    /// `SLACK_CLIENT_ID` / `SLACK_CLIENT_SECRET` and `SLACK_REDIRECT_URI`.
    /// A provider whose variables are unset is left unconfigured.
    pub fn from_env() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::from_env()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Configured credentials have a non-empty id and secret
    /// - The page bound, when set, is greater than zero
    /// - The Slack redirect URI, when set, is not blank
    pub fn validate(&self) -> Result<()> {
        for (provider, credentials) in [
            (ProviderKind::Dropbox, &self.dropbox_credentials),
            (ProviderKind::Slack, &self.slack_credentials),
        ] {
            if let Some(credentials) = credentials {
                if !credentials.is_complete() {
                    return Err(Error::Config(format!(
                        "{} credentials need both a client id and a client secret",
                        provider
                    )));
                }
            }
        }

        if self.dropbox_max_pages == Some(0) {
            return Err(Error::Config(
                "Dropbox page bound must be greater than 0".to_string(),
            ));
        }

        if let Some(uri) = &self.slack_redirect_uri {
            if uri.trim().is_empty() {
                return Err(Error::Config(
                    "Slack redirect URI cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Credentials for `provider`, or a configuration error naming the
    /// environment variables that would supply them.
    pub fn require_credentials(&self, provider: ProviderKind) -> Result<&ClientCredentials> {
        let credentials = match provider {
            ProviderKind::Dropbox => self.dropbox_credentials.as_ref(),
            ProviderKind::Slack => self.slack_credentials.as_ref(),
        };

        credentials.ok_or_else(|| {
            let prefix = provider.env_prefix();
            Error::Config(format!(
                "{} credentials are not configured. Set {}_CLIENT_ID and {}_CLIENT_SECRET \
                 or call .{}_credentials() on the builder.",
                provider,
                prefix,
                prefix,
                prefix.to_lowercase()
            ))
        })
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::new().map_err(|e| {
        Error::Internal(format!("Failed to initialize default HttpClient: {}", e))
    })?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required to reach the providers. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Other hosts: inject an implementation with .http_client()."
            .to_string(),
    })
}

/// Builder for constructing [`ConnectorConfig`] instances.
#[derive(Default)]
pub struct ConnectorConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    redirect_uri_builder: Option<Arc<dyn RedirectUriBuilder>>,
    callback_scheme: CallbackScheme,
    dropbox_credentials: Option<ClientCredentials>,
    dropbox_max_pages: Option<u32>,
    slack_credentials: Option<ClientCredentials>,
    slack_redirect_uri: Option<String>,
}

impl ConnectorConfigBuilder {
    /// Builder with credentials read from the environment.
    ///
    /// Values set afterwards on the builder override the environment.
    pub fn from_env() -> Self {
        Self {
            dropbox_credentials: credentials_from_env(ProviderKind::Dropbox),
            slack_credentials: credentials_from_env(ProviderKind::Slack),
            slack_redirect_uri: std::env::var(SLACK_REDIRECT_URI_VAR)
                .ok()
                .filter(|uri| !uri.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the callback URI builder, scheme included. When set,
    /// [`callback_scheme`](Self::callback_scheme) is ignored.
    pub fn redirect_uri_builder(mut self, builder: Arc<dyn RedirectUriBuilder>) -> Self {
        self.redirect_uri_builder = Some(builder);
        self
    }

    /// Scheme of the default callback URI builder.
    ///
    /// Default: [`CallbackScheme::Https`]
    pub fn callback_scheme(mut self, scheme: CallbackScheme) -> Self {
        self.callback_scheme = scheme;
        self
    }

    pub fn dropbox_credentials(mut self, credentials: ClientCredentials) -> Self {
        self.dropbox_credentials = Some(credentials);
        self
    }

    /// Bounds how many list-folder pages a single fetch may request.
    ///
    /// Default: unbounded
    pub fn dropbox_max_pages(mut self, max_pages: u32) -> Self {
        self.dropbox_max_pages = Some(max_pages);
        self
    }

    pub fn slack_credentials(mut self, credentials: ClientCredentials) -> Self {
        self.slack_credentials = Some(credentials);
        self
    }

    pub fn slack_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.slack_redirect_uri = Some(uri.into());
        self
    }

    /// Builds the final `ConnectorConfig` instance.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when no HTTP client is injected and no
    ///   platform default is compiled in
    /// - [`Error::Config`] when a value fails validation
    pub fn build(self) -> Result<ConnectorConfig> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let redirect_uri_builder = self
            .redirect_uri_builder
            .unwrap_or_else(|| Arc::new(self.callback_scheme.uri_builder()));

        let config = ConnectorConfig {
            http_client,
            redirect_uri_builder,
            dropbox_credentials: self.dropbox_credentials,
            dropbox_max_pages: self.dropbox_max_pages,
            slack_credentials: self.slack_credentials,
            slack_redirect_uri: self.slack_redirect_uri,
        };

        config.validate()?;

        Ok(config)
    }
}

fn credentials_from_env(provider: ProviderKind) -> Option<ClientCredentials> {
    match ClientCredentials::from_env_for(provider) {
        Ok(credentials) => Some(credentials),
        Err(AuthError::MissingCredential(var)) => {
            debug!(%provider, missing = %var, "Provider credentials not found in environment");
            None
        }
        Err(_) => None,
    }
}
