//! Dropbox client contract and configuration

use async_trait::async_trait;
use core_auth::{AccessToken, AccountId, AuthorizationCode, ClientCredentials, Cursor};

use crate::error::{DropboxError, Result};
use crate::types::FileEntry;

/// User-facing authorization endpoint
pub const DROPBOX_AUTHORIZE_URL: &str = "https://www.dropbox.com/oauth2/authorize";

/// Base URL for RPC endpoints and the token endpoint
pub const DROPBOX_API_BASE: &str = "https://api.dropboxapi.com";

/// Route name the OAuth redirect comes back to
pub const OAUTH_CALLBACK_ROUTE: &str = "dropbox-oauth-complete";

/// Token and account returned by a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAccessToken {
    pub access_token: AccessToken,
    pub account_id: AccountId,
}

/// Every entry collected by a pagination run plus the cursor to resume from.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFetchResult {
    /// Entries in provider order, earlier pages first
    pub files: Vec<FileEntry>,
    pub new_cursor: Cursor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub user_name: String,
}

/// Upper bound on the number of `list_folder/continue` pages one
/// [`fetch_all_files`](DropboxClient::fetch_all_files) call may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationLimit {
    /// `None` follows `has_more` until the provider reports the end
    pub max_pages: Option<u32>,
}

impl PaginationLimit {
    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }

    pub fn max_pages(max_pages: u32) -> Self {
        Self {
            max_pages: Some(max_pages),
        }
    }

    /// Fails once `pages_fetched` has reached the bound.
    pub(crate) fn check(&self, pages_fetched: u32) -> Result<()> {
        match self.max_pages {
            Some(max_pages) if pages_fetched >= max_pages => {
                Err(DropboxError::LimitExceeded { max_pages })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration for [`HttpDropboxClient`](crate::HttpDropboxClient).
#[derive(Debug, Clone)]
pub struct DropboxConfig {
    pub credentials: ClientCredentials,
    pub pagination: PaginationLimit,
    pub authorize_url: String,
    pub api_base_url: String,
}

impl DropboxConfig {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            pagination: PaginationLimit::default(),
            authorize_url: DROPBOX_AUTHORIZE_URL.to_string(),
            api_base_url: DROPBOX_API_BASE.to_string(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationLimit) -> Self {
        self.pagination = pagination;
        self
    }

    /// Point API and token calls at another base URL (proxies, test servers).
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.api_base_url)
    }

    pub(crate) fn rpc_url(&self, endpoint: &str) -> String {
        format!("{}/2/{}", self.api_base_url, endpoint)
    }
}

/// Operations the host performs against a user's Dropbox.
///
/// # Example
///
/// ```ignore
/// use provider_dropbox::{DropboxClient, HttpDropboxClient};
///
/// let login_url = client.authorization_uri("app.example.com")?;
/// // ... user returns with `code` ...
/// let session = client.exchange_code_for_token(&code, &redirect_uri).await?;
/// let cursor = client
///     .get_latest_cursor(&session.account_id, &session.access_token)
///     .await?;
/// // later, once a change notification arrives:
/// let changes = client
///     .fetch_all_files(&session.account_id, &session.access_token, &cursor)
///     .await?;
/// ```
#[async_trait]
pub trait DropboxClient: Send + Sync {
    /// URL that starts the OAuth flow for `host`.
    fn authorization_uri(&self, host: &str) -> Result<String>;

    /// Exchange a single-use authorization code for a token.
    async fn exchange_code_for_token(
        &self,
        code: &AuthorizationCode,
        redirect_uri: &str,
    ) -> Result<AccountAccessToken>;

    /// Cursor marking "now" in the account's full recursive file feed.
    async fn get_latest_cursor(&self, account_id: &AccountId, token: &AccessToken)
        -> Result<Cursor>;

    /// Follow the change feed from `cursor` until the provider reports no more
    /// pages.
    async fn fetch_all_files(
        &self,
        account_id: &AccountId,
        token: &AccessToken,
        cursor: &Cursor,
    ) -> Result<FileFetchResult>;

    async fn get_user_details_by_id(
        &self,
        user_id: &AccountId,
        token: &AccessToken,
    ) -> Result<UserDetails>;

    async fn get_current_user_details(&self, token: &AccessToken) -> Result<UserDetails>;
}
