#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lendmit_api::{ApiClient, CreateProfile, Endpoints, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, Endpoints::default());
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_user_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/login"))
        .and(body_json(json!({ "email": "a@mit.edu", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": "u1" })))
        .mount(&server)
        .await;

    let user = client.login("a@mit.edu", &secret("pw")).await.unwrap();
    assert_eq!(user, "u1");
}

#[tokio::test]
async fn test_blank_user_id_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": "" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/registerUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": "   " })))
        .mount(&server)
        .await;

    let err = client.login("a@mit.edu", &secret("pw")).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got {err:?}");
    let err = client
        .register_user("a@mit.edu", &secret("pw"))
        .await
        .unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_field_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let result = client.login("a@mit.edu", &secret("bad")).await;

    match result {
        Err(Error::Server {
            status,
            ref message,
            ref url,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid credentials");
            assert!(url.ends_with("/api/UserAuthentication/login"), "url was {url}");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unrecognized_error_body_synthesizes_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/registerUser"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client
        .register_user("a@mit.edu", &secret("pw"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Request failed with status code 502");
}

#[tokio::test]
async fn test_error_field_with_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/sendVerificationCode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "error": "An unexpired verification code already exists" }),
        ))
        .mount(&server)
        .await;

    let err = client
        .send_verification_code("u1", "a@mit.edu")
        .await
        .unwrap_err();

    assert_eq!(
        err.server_message(),
        Some("An unexpired verification code already exists")
    );
}

#[tokio::test]
async fn test_verify_code_flag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/verifyCode"))
        .and(body_json(json!({ "user": "u1", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "verified": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/verifyCode"))
        .and(body_json(json!({ "user": "u1", "code": "000000" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(client.verify_code("u1", "123456").await.unwrap());
    assert!(!client.verify_code("u1", "000000").await.unwrap());
}

#[tokio::test]
async fn test_verify_code_flag_is_read_loosely() {
    let (server, client) = setup().await;

    for (code, flag) in [("111111", json!(1)), ("222222", json!("true")), ("333333", json!(0))] {
        Mock::given(method("POST"))
            .and(path("/api/UserAuthentication/verifyCode"))
            .and(body_json(json!({ "user": "u1", "code": code })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "verified": flag })))
            .mount(&server)
            .await;
    }

    assert!(client.verify_code("u1", "111111").await.unwrap());
    assert!(client.verify_code("u1", "222222").await.unwrap());
    assert!(!client.verify_code("u1", "333333").await.unwrap());
}

#[tokio::test]
async fn test_create_profile_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/UserProfile/createProfile"))
        .and(body_json(json!({
            "user": "u1",
            "firstName": "A",
            "lastName": "B",
            "bio": null,
            "thumbnail": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_profile(&CreateProfile::new("u1", "A", "B"))
        .await
        .unwrap();
}

// ── Transport tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_body_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/Following/follow"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.follow("u1", "u2").await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/Resource/listResources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_resources().await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    let base_url = Url::parse("http://127.0.0.1:9/api").unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, Endpoints::default());

    let err = client.get_followees("u1").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}

#[tokio::test]
async fn test_custom_following_prefix_is_used() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/", server.uri())).unwrap();
    let endpoints = Endpoints::default().with_following_prefix("/api/Subscriptions");
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, endpoints);

    Mock::given(method("POST"))
        .and(path("/api/Subscriptions/getFollowees"))
        .and(body_json(json!({ "follower": "u1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["u2"])))
        .mount(&server)
        .await;

    let value = client.get_followees("u1").await.unwrap();
    assert_eq!(value, json!(["u2"]));
}
