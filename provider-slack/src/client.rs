//! Slack OAuth v2 client

use async_trait::async_trait;
use bridge_traits::http::HttpClient;
use core_auth::{
    AccessToken, AuthorizationCode, AuthorizationCodeExchange, ClientCredentials, ProviderKind,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{Result, SlackError};

/// Base URL of the Slack Web API
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Workspace the token was issued for
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlackTeam {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Token issued by `oauth.v2.access`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackToken {
    pub access_token: AccessToken,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub bot_user_id: Option<String>,
    pub team: Option<SlackTeam>,
    /// User who approved the installation
    pub authed_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthedUser {
    id: String,
}

/// `oauth.v2.access` response. Slack reports failures with HTTP 200 and
/// `ok: false`.
#[derive(Debug, Deserialize)]
struct OAuthAccessResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    access_token: Option<AccessToken>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    bot_user_id: Option<String>,
    #[serde(default)]
    team: Option<SlackTeam>,
    #[serde(default)]
    authed_user: Option<AuthedUser>,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub credentials: ClientCredentials,
    /// Must match the redirect URI used to start the flow, when one was sent
    pub redirect_uri: Option<String>,
    pub api_base_url: String,
}

impl SlackConfig {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            redirect_uri: None,
            api_base_url: SLACK_API_BASE.to_string(),
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = base.into().trim_end_matches('/').to_string();
        self
    }

    fn token_url(&self) -> String {
        format!("{}/oauth.v2.access", self.api_base_url)
    }
}

/// Messaging provider capability: turn an authorization code into a token.
#[async_trait]
pub trait SlackClient: Send + Sync {
    async fn get_token(&self, code: &AuthorizationCode) -> Result<SlackToken>;
}

pub struct HttpSlackClient {
    config: SlackConfig,
    token_exchange: AuthorizationCodeExchange,
}

impl HttpSlackClient {
    pub fn new(config: SlackConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let token_exchange =
            AuthorizationCodeExchange::new(ProviderKind::Slack, config.token_url(), http_client);

        Self {
            config,
            token_exchange,
        }
    }
}

#[async_trait]
impl SlackClient for HttpSlackClient {
    #[instrument(skip(self, code))]
    async fn get_token(&self, code: &AuthorizationCode) -> Result<SlackToken> {
        let credentials = &self.config.credentials;
        let mut params = vec![
            ("code", code.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];
        if let Some(redirect_uri) = self.config.redirect_uri.as_deref() {
            params.push(("redirect_uri", redirect_uri));
        }

        let response: OAuthAccessResponse = self.token_exchange.exchange(&params).await?;

        if !response.ok {
            let error = response.error.unwrap_or_else(|| "unknown_error".to_string());
            warn!(error = %error, "Slack rejected the authorization code");
            return Err(SlackError::ApiError(error));
        }

        let access_token = response.access_token.ok_or_else(|| {
            SlackError::ParseError("response is missing access_token".to_string())
        })?;

        info!(
            team_id = response.team.as_ref().map(|t| t.id.as_str()).unwrap_or("-"),
            "Received Slack access token"
        );

        Ok(SlackToken {
            access_token,
            token_type: response.token_type,
            scope: response.scope,
            bot_user_id: response.bot_user_id,
            team: response.team,
            authed_user_id: response.authed_user.map(|u| u.id),
        })
    }
}
