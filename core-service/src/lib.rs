//! Connector service façade and bootstrap helpers.
//!
//! This crate wires a [`ConnectorConfig`] (HTTP transport, callback URI
//! builder, per-provider credentials) into the provider clients. Desktop apps
//! typically keep the default `desktop-shims` feature, which injects the
//! reqwest-backed transport from `bridge-desktop` when none is supplied.
//! Each provider sits behind its own feature (`dropbox`, `slack`).

pub mod error;

pub use core_runtime::config::{CallbackScheme, ConnectorConfig, ConnectorConfigBuilder};
pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::http::HttpClient;
#[cfg(any(feature = "dropbox", feature = "slack"))]
use core_auth::ProviderKind;
#[cfg(any(feature = "dropbox", feature = "slack"))]
use tracing::info;

#[cfg(feature = "dropbox")]
use provider_dropbox::{DropboxClient, DropboxConfig, HttpDropboxClient, PaginationLimit};
#[cfg(feature = "slack")]
use provider_slack::{HttpSlackClient, SlackClient, SlackConfig};

/// Primary façade exposed to host applications.
#[derive(Clone, Debug)]
pub struct ConnectorService {
    config: Arc<ConnectorConfig>,
}

impl ConnectorService {
    /// Create a new service from an already validated configuration.
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Build a service from the process environment.
    ///
    /// ```ignore
    /// let service = core_service::ConnectorService::bootstrap()?;
    /// let login_url = service.dropbox()?.authorization_uri("app.example.com")?;
    /// ```
    pub fn bootstrap() -> Result<Self> {
        Ok(Self::new(ConnectorConfig::from_env().build()?))
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Transport shared by every client the service hands out.
    pub fn http_client(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.config.http_client)
    }

    /// Dropbox client using the configured credentials and page bound.
    ///
    /// # Errors
    ///
    /// [`CoreError::InitializationFailed`] when no Dropbox credentials are
    /// configured.
    #[cfg(feature = "dropbox")]
    pub fn dropbox(&self) -> Result<Arc<dyn DropboxClient>> {
        let credentials = self.config.require_credentials(ProviderKind::Dropbox)?;

        let dropbox_config = DropboxConfig::new(credentials.clone()).with_pagination(
            PaginationLimit {
                max_pages: self.config.dropbox_max_pages,
            },
        );

        info!(
            client_id = %credentials.client_id,
            max_pages = ?self.config.dropbox_max_pages,
            "Created Dropbox client"
        );

        Ok(Arc::new(HttpDropboxClient::new(
            dropbox_config,
            self.http_client(),
            Arc::clone(&self.config.redirect_uri_builder),
        )))
    }

    /// Slack client using the configured credentials and redirect URI.
    ///
    /// # Errors
    ///
    /// [`CoreError::InitializationFailed`] when no Slack credentials are
    /// configured.
    #[cfg(feature = "slack")]
    pub fn slack(&self) -> Result<Arc<dyn SlackClient>> {
        let credentials = self.config.require_credentials(ProviderKind::Slack)?;

        let mut slack_config = SlackConfig::new(credentials.clone());
        if let Some(redirect_uri) = &self.config.slack_redirect_uri {
            slack_config = slack_config.with_redirect_uri(redirect_uri.clone());
        }

        info!(client_id = %credentials.client_id, "Created Slack client");

        Ok(Arc::new(HttpSlackClient::new(slack_config, self.http_client())))
    }
}
