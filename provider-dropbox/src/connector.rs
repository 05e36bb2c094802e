//! Dropbox API connector implementation
//!
//! Implements [`DropboxClient`] over the Dropbox HTTP API v2.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest};
use core_auth::{
    build_authorization_url, AccessToken, AccountId, AuthorizationCode,
    AuthorizationCodeExchange, Cursor, ProviderKind, RedirectUriBuilder,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::client::{
    AccountAccessToken, DropboxClient, DropboxConfig, FileFetchResult, UserDetails,
    OAUTH_CALLBACK_ROUTE,
};
use crate::error::{DropboxError, Result};
use crate::types::{
    AccountResponse, GetAccountArg, LatestCursorResult, ListFolderArg, ListFolderContinueArg,
    ListFolderResult, TokenResponse,
};

/// Dropbox API connector
///
/// Holds only immutable configuration and shared handles, so one instance can
/// serve any number of accounts concurrently. Tokens are passed per call.
///
/// # Features
///
/// - Authorization URL construction and code exchange
/// - Latest-cursor lookup for the full recursive file tree
/// - Change feed pagination with an optional page bound
/// - Account display-name lookup
pub struct HttpDropboxClient {
    config: DropboxConfig,
    http_client: Arc<dyn HttpClient>,
    redirect_uris: Arc<dyn RedirectUriBuilder>,
    token_exchange: AuthorizationCodeExchange,
}

impl HttpDropboxClient {
    /// Create a new Dropbox connector
    ///
    /// # Arguments
    ///
    /// * `config` - Application credentials, endpoints and pagination bound
    /// * `http_client` - HTTP transport
    /// * `redirect_uris` - Maps a host to the OAuth callback URL
    pub fn new(
        config: DropboxConfig,
        http_client: Arc<dyn HttpClient>,
        redirect_uris: Arc<dyn RedirectUriBuilder>,
    ) -> Self {
        let token_exchange = AuthorizationCodeExchange::new(
            ProviderKind::Dropbox,
            config.token_url(),
            Arc::clone(&http_client),
        );

        Self {
            config,
            http_client,
            redirect_uris,
            token_exchange,
        }
    }

    pub fn config(&self) -> &DropboxConfig {
        &self.config
    }

    /// Authenticated `POST` to an RPC endpoint
    fn rpc_request(&self, endpoint: &str, token: &AccessToken) -> HttpRequest {
        HttpRequest::post(self.config.rpc_url(endpoint)).bearer_token(token)
    }

    /// Execute a request and decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "Dropbox API request failed");
            return Err(DropboxError::ApiError {
                status_code: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        response
            .json()
            .map_err(|e| DropboxError::ParseError(e.to_string()))
    }

    async fn list_folder_continue(
        &self,
        token: &AccessToken,
        cursor: &Cursor,
    ) -> Result<ListFolderResult> {
        let request = self
            .rpc_request("files/list_folder/continue", token)
            .json(&ListFolderContinueArg { cursor })?;

        self.send(request).await
    }
}

#[async_trait]
impl DropboxClient for HttpDropboxClient {
    fn authorization_uri(&self, host: &str) -> Result<String> {
        let redirect_uri = self.redirect_uris.path_to(host, OAUTH_CALLBACK_ROUTE)?;

        let uri = build_authorization_url(
            &self.config.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.credentials.client_id.as_str()),
                ("redirect_uri", &redirect_uri),
            ],
        )?;

        Ok(uri)
    }

    #[instrument(skip(self, code))]
    async fn exchange_code_for_token(
        &self,
        code: &AuthorizationCode,
        redirect_uri: &str,
    ) -> Result<AccountAccessToken> {
        info!("Requesting user token");

        let credentials = &self.config.credentials;
        let params = [
            ("code", code.as_str()),
            ("grant_type", "authorization_code"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        let response: TokenResponse = self.token_exchange.exchange(&params).await?;

        info!(account_id = %response.account_id, "Received access token");

        Ok(AccountAccessToken {
            access_token: response.access_token,
            account_id: response.account_id,
        })
    }

    #[instrument(skip(self, token), fields(account_id = %account_id))]
    async fn get_latest_cursor(
        &self,
        account_id: &AccountId,
        token: &AccessToken,
    ) -> Result<Cursor> {
        info!("Getting initial cursor");

        let request = self
            .rpc_request("files/list_folder/get_latest_cursor", token)
            .json(&ListFolderArg::full_tree())?;

        let result: LatestCursorResult = self.send(request).await?;

        Ok(result.cursor)
    }

    #[instrument(skip(self, token, cursor), fields(account_id = %account_id))]
    async fn fetch_all_files(
        &self,
        account_id: &AccountId,
        token: &AccessToken,
        cursor: &Cursor,
    ) -> Result<FileFetchResult> {
        info!(cursor = %cursor, "Fetching files");

        let mut files = Vec::new();
        let mut cursor = cursor.clone();
        let mut pages: u32 = 0;

        loop {
            self.config.pagination.check(pages)?;

            debug!(account_id = %account_id, cursor = %cursor, page = pages + 1, "Fetching page");

            let page = self.list_folder_continue(token, &cursor).await?;
            pages += 1;

            debug!(entries = page.entries.len(), has_more = page.has_more, "Page received");

            files.extend(page.entries);
            cursor = page.cursor;

            if !page.has_more {
                break;
            }
        }

        info!(files = files.len(), pages, "Fetched all files");

        Ok(FileFetchResult {
            files,
            new_cursor: cursor,
        })
    }

    #[instrument(skip(self, token), fields(user_id = %user_id))]
    async fn get_user_details_by_id(
        &self,
        user_id: &AccountId,
        token: &AccessToken,
    ) -> Result<UserDetails> {
        let request = self
            .rpc_request("users/get_account", token)
            .json(&GetAccountArg {
                account_id: user_id,
            })?;

        let account: AccountResponse = self.send(request).await?;

        Ok(UserDetails {
            user_name: account.name.display_name,
        })
    }

    #[instrument(skip(self, token))]
    async fn get_current_user_details(&self, token: &AccessToken) -> Result<UserDetails> {
        let request = self.rpc_request("users/get_current_account", token);

        let account: AccountResponse = self.send(request).await?;

        Ok(UserDetails {
            user_name: account.name.display_name,
        })
    }
}
