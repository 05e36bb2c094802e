//! End-to-end flows through the reqwest transport against a mock Dropbox

use bridge_desktop::ReqwestHttpClient;
use core_auth::{
    AccessToken, AccountId, AuthorizationCode, ClientCredentials, Cursor, HostRouteUriBuilder,
};
use provider_dropbox::{
    DropboxClient, DropboxConfig, DropboxError, HttpDropboxClient, PaginationLimit,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, pagination: PaginationLimit) -> HttpDropboxClient {
    let config = DropboxConfig::new(ClientCredentials::new("app-key", "app-secret"))
        .with_api_base_url(server.uri())
        .with_pagination(pagination);

    HttpDropboxClient::new(
        config,
        Arc::new(ReqwestHttpClient::new().unwrap()),
        Arc::new(HostRouteUriBuilder::default()),
    )
}

fn continue_page(entries: &[&str], cursor: &str, has_more: bool) -> ResponseTemplate {
    let entries: Vec<_> = entries
        .iter()
        .map(|name| json!({ ".tag": "file", "name": name, "id": format!("id:{}", name) }))
        .collect();

    ResponseTemplate::new(200).set_body_json(json!({
        "entries": entries,
        "cursor": cursor,
        "has_more": has_more
    }))
}

#[tokio::test]
async fn test_login_then_initial_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("code=abc"))
        .and(body_string_contains("client_secret=app-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T1",
            "token_type": "bearer",
            "account_id": "A1",
            "uid": "12345"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder/get_latest_cursor"))
        .and(header("Authorization", "Bearer T1"))
        .and(body_json(json!({
            "path": "",
            "recursive": true,
            "include_media_info": true,
            "include_deleted": false,
            "include_has_explicit_shared_members": false,
            "include_mounted_folders": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cursor": "c1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PaginationLimit::unbounded());

    let session = client
        .exchange_code_for_token(
            &AuthorizationCode::new("abc"),
            "https://app.example.com/dropbox-oauth-complete",
        )
        .await
        .unwrap();
    assert_eq!(session.access_token.as_str(), "T1");
    assert_eq!(session.account_id.as_str(), "A1");

    let cursor = client
        .get_latest_cursor(&session.account_id, &session.access_token)
        .await
        .unwrap();
    assert_eq!(cursor.as_str(), "c1");
}

#[tokio::test]
async fn test_fetch_all_files_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder/continue"))
        .and(body_json(json!({ "cursor": "c1" })))
        .respond_with(continue_page(&["e1"], "c2", true))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder/continue"))
        .and(body_json(json!({ "cursor": "c2" })))
        .respond_with(continue_page(&["e2", "e3"], "c3", false))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PaginationLimit::unbounded());
    let result = client
        .fetch_all_files(
            &AccountId::new("A1"),
            &AccessToken::new("T1"),
            &Cursor::new("c1"),
        )
        .await
        .unwrap();

    let names: Vec<_> = result.files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["e1", "e2", "e3"]);
    assert_eq!(result.new_cursor.as_str(), "c3");
}

#[tokio::test]
async fn test_user_details_both_variants() {
    let server = MockServer::start().await;
    let account = json!({ "account_id": "dbid:1", "name": { "display_name": "Alice" } });

    Mock::given(method("POST"))
        .and(path("/2/users/get_account"))
        .and(body_json(json!({ "account_id": "dbid:1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(account.clone()))
        .mount(&server)
        .await;

    // Served as text/plain to make sure parsing never depends on the content type
    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(account.to_string())
                .insert_header("Content-Type", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, PaginationLimit::unbounded());
    let token = AccessToken::new("T1");

    let by_id = client
        .get_user_details_by_id(&AccountId::new("dbid:1"), &token)
        .await
        .unwrap();
    let current = client.get_current_user_details(&token).await.unwrap();

    assert_eq!(by_id.user_name, "Alice");
    assert_eq!(current, by_id);
}

#[tokio::test]
async fn test_server_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PaginationLimit::max_pages(5));
    let err = client
        .get_latest_cursor(&AccountId::new("A1"), &AccessToken::new("T1"))
        .await
        .unwrap_err();

    assert!(matches!(err, DropboxError::ApiError { status_code: 500, .. }));
    assert!(err.is_transport_failure());
}
