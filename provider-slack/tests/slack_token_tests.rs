use bridge_desktop::ReqwestHttpClient;
use core_auth::{AuthorizationCode, ClientCredentials};
use provider_slack::{HttpSlackClient, SlackClient, SlackConfig, SlackError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpSlackClient {
    let config = SlackConfig::new(ClientCredentials::new("slack-id", "slack-secret"))
        .with_api_base_url(server.uri());

    HttpSlackClient::new(config, Arc::new(ReqwestHttpClient::new().unwrap()))
}

#[tokio::test]
async fn test_get_token_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth.v2.access"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "code=abc&client_id=slack-id&client_secret=slack-secret",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "access_token": "xoxb-1",
            "token_type": "bot",
            "team": { "id": "T1", "name": "Team" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .get_token(&AuthorizationCode::new("abc"))
        .await
        .unwrap();

    assert_eq!(token.access_token.as_str(), "xoxb-1");
    assert_eq!(token.team.map(|t| t.name), Some(Some("Team".to_string())));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_token(&AuthorizationCode::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SlackError::Auth(core_auth::AuthError::InvalidAuthCode(_))
    ));
}
