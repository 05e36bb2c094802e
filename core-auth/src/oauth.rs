//! OAuth 2.0 Authorization Code Exchange
//!
//! Implements the two halves of the RFC 6749 authorization code grant that
//! the connectors need:
//! - Building the authorization URL the user is sent to
//! - Exchanging the returned code for an access token
//!
//! Token refresh is not handled; providers used here issue long-lived tokens.
//!
//! # Security
//!
//! - Never logs sensitive values (tokens, codes, secrets)
//! - Token endpoint errors keep the provider's body for diagnostics, which
//!   never echoes the submitted secret
//!
//! # Example
//!
//! ```no_run
//! use core_auth::oauth::AuthorizationCodeExchange;
//! use core_auth::ProviderKind;
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct Token {
//!     access_token: String,
//! }
//!
//! # async fn example() -> core_auth::Result<()> {
//! # use bridge_traits::http::HttpClient;
//! # let http_client: Arc<dyn HttpClient> = todo!();
//! let exchange = AuthorizationCodeExchange::new(
//!     ProviderKind::Dropbox,
//!     "https://api.dropboxapi.com/oauth2/token",
//!     http_client,
//! );
//! let token: Token = exchange
//!     .exchange(&[("code", "abc"), ("grant_type", "authorization_code")])
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::ProviderKind;
use bridge_traits::http::{HttpClient, HttpRequest};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Build an authorization URL by appending `params` to `base` in order.
///
/// Values are percent-encoded; parameters already present on `base` are kept.
///
/// # Errors
///
/// Returns [`AuthError::Other`] if `base` is not an absolute URL.
pub fn build_authorization_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut url =
        Url::parse(base).map_err(|e| AuthError::Other(format!("Invalid auth URL: {}", e)))?;

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params {
            query.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

/// Exchanges authorization codes at a provider's token endpoint.
///
/// Sends exactly one form-encoded `POST` per call and deserializes the body
/// into whatever response shape the provider uses.
pub struct AuthorizationCodeExchange {
    provider: ProviderKind,
    token_url: String,
    http_client: Arc<dyn HttpClient>,
}

impl AuthorizationCodeExchange {
    pub fn new(
        provider: ProviderKind,
        token_url: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            provider,
            token_url: token_url.into(),
            http_client,
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Post `params` to the token endpoint and parse the JSON reply as `T`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NetworkError`] if the transport fails
    /// - [`AuthError::InvalidAuthCode`] if the endpoint answers with a non-2xx status
    /// - [`AuthError::ParseError`] if the body is not the expected JSON shape
    #[instrument(skip(self, params), fields(provider = %self.provider))]
    pub async fn exchange<P, T>(&self, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("Exchanging authorization code for tokens");

        let request = HttpRequest::post(self.token_url.clone())
            .form(params)
            .map_err(|e| AuthError::Other(format!("Failed to encode token request: {}", e)))?;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            let error_body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(
                status = status,
                error = %error_body,
                "Token exchange failed while exchanging authorization code"
            );

            return Err(AuthError::InvalidAuthCode(format!(
                "Token endpoint returned {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .map_err(|e| AuthError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpMethod, HttpResponse};
    use mockall::mock;
    use serde::Deserialize;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    #[derive(Debug, Deserialize)]
    struct TokenResponse {
        access_token: String,
        #[serde(default)]
        token_type: Option<String>,
    }

    fn exchange_with(mock: MockHttpClient) -> AuthorizationCodeExchange {
        AuthorizationCodeExchange::new(
            ProviderKind::Dropbox,
            "https://provider.example/oauth2/token",
            Arc::new(mock),
        )
    }

    #[test]
    fn test_build_authorization_url() {
        let url = build_authorization_url(
            "https://provider.example/oauth2/authorize",
            &[
                ("response_type", "code"),
                ("client_id", "test-client"),
                ("redirect_uri", "https://app.example/callback"),
            ],
        )
        .unwrap();

        assert_eq!(
            url,
            "https://provider.example/oauth2/authorize?response_type=code&client_id=test-client\
             &redirect_uri=https%3A%2F%2Fapp.example%2Fcallback"
        );
    }

    #[test]
    fn test_build_authorization_url_invalid_base() {
        assert!(build_authorization_url("not a valid url", &[]).is_err());
    }

    #[tokio::test]
    async fn test_exchange_posts_form_and_parses_json() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .times(1)
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "https://provider.example/oauth2/token"
                    && req.headers.get("Content-Type").map(String::as_str)
                        == Some("application/x-www-form-urlencoded")
                    && req.body_text().as_deref()
                        == Some("code=abc&grant_type=authorization_code")
            })
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"access_token":"T1","token_type":"bearer"}"#,
                ))
            });

        let token: TokenResponse = exchange_with(mock)
            .exchange(&[("code", "abc"), ("grant_type", "authorization_code")])
            .await
            .unwrap();

        assert_eq!(token.access_token, "T1");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));
    }

    #[tokio::test]
    async fn test_exchange_rejected_code() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(HttpResponse::new(400, r#"{"error":"invalid_grant"}"#)));

        let result: Result<TokenResponse> = exchange_with(mock).exchange(&[("code", "x")]).await;

        match result {
            Err(AuthError::InvalidAuthCode(message)) => {
                assert!(message.contains("400"));
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_transport_failure() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(|_| {
            Err(BridgeError::OperationFailed(
                "Connection failed".to_string(),
            ))
        });

        let result: Result<TokenResponse> = exchange_with(mock).exchange(&[("code", "x")]).await;

        assert!(matches!(result, Err(AuthError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_exchange_malformed_body() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(HttpResponse::new(200, "<html>oops</html>")));

        let result: Result<TokenResponse> = exchange_with(mock).exchange(&[("code", "x")]).await;

        assert!(matches!(result, Err(AuthError::ParseError(_))));
    }
}
