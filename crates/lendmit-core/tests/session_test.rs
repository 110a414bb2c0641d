#![allow(clippy::unwrap_used)]
// Session manager flows against a mock API.

mod common;

use lendmit_core::{CoreError, Identity, ResendOutcome, SessionState};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{respond, secret, setup};

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_sets_identity_and_state() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/login", 200, json!({ "user": "u1" })).await;

    let identity = client
        .session()
        .login("a@mit.edu", &secret("pw"))
        .await
        .unwrap();

    assert_eq!(identity, Identity::new("u1", "a@mit.edu"));
    assert_eq!(client.session().handle().user_id().as_deref(), Some("u1"));
    assert_eq!(client.session().state(), SessionState::Authenticated);
    let status = client.session().status();
    assert_eq!(status.info.as_deref(), Some("Logged in successfully."));
    assert!(!status.loading);
}

#[tokio::test]
async fn test_login_failure_records_and_reraises() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/login",
        401,
        json!({ "error": "Invalid credentials" }),
    )
    .await;

    let err = client
        .session()
        .login("a@mit.edu", &secret("bad"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Server { status: 401, .. }));
    let status = client.session().status();
    assert_eq!(status.error.as_deref(), Some("Invalid credentials"));
    assert!(!status.loading);
    assert!(client.session().identity().is_none());
    assert_eq!(client.session().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_login_with_blank_user_id_stays_anonymous() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/login", 200, json!({ "user": "" })).await;

    let err = client
        .session()
        .login("a@mit.edu", &secret("pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Transport { .. }), "got {err:?}");
    assert!(client.session().identity().is_none());
    assert_eq!(client.session().state(), SessionState::Anonymous);
    assert!(client.session().status().error.is_some());
}

#[tokio::test]
async fn test_signup_with_blank_user_id_aborts() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/registerUser", 200, json!({ "user": " " })).await;

    let err = client
        .session()
        .signup("A", "B", "a@mit.edu", &secret("pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Transport { .. }), "got {err:?}");
    assert!(client.session().identity().is_none());
    assert_eq!(client.session().state(), SessionState::Error);
}

// ── Signup ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_signup_survives_failed_code_delivery() {
    let (server, client, _) = setup().await;

    respond(
        &server,
        "/UserAuthentication/registerUser",
        200,
        json!({ "user": "u1" }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/UserProfile/createProfile"))
        .and(body_json(json!({
            "user": "u1",
            "firstName": "A",
            "lastName": "B",
            "bio": null,
            "thumbnail": null,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    respond(
        &server,
        "/UserAuthentication/sendVerificationCode",
        500,
        json!({ "error": "mailer offline" }),
    )
    .await;

    let identity = client
        .session()
        .signup("A", "B", "a@mit.edu", &secret("pw"))
        .await
        .unwrap();

    assert_eq!(
        identity,
        Identity::new("u1", "a@mit.edu").with_names("A", "B")
    );
    assert_eq!(client.session().identity(), Some(identity));
    let status = client.session().status();
    assert_eq!(
        status.info.as_deref(),
        Some("Account created. Please check your email for a verification code.")
    );
    assert_eq!(status.error, None);
    assert_eq!(client.session().state(), SessionState::ProfilePending);
}

#[tokio::test]
async fn test_signup_with_code_sent_reaches_code_sent() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/registerUser",
        200,
        json!({ "user": "u1" }),
    )
    .await;
    respond(&server, "/UserProfile/createProfile", 200, json!({})).await;
    respond(&server, "/UserAuthentication/sendVerificationCode", 200, json!({})).await;

    client
        .session()
        .signup("A", "B", "a@mit.edu", &secret("pw"))
        .await
        .unwrap();

    assert_eq!(client.session().state(), SessionState::CodeSent);
}

#[tokio::test]
async fn test_signup_aborts_when_profile_creation_fails() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/registerUser",
        200,
        json!({ "user": "u1" }),
    )
    .await;
    respond(
        &server,
        "/UserProfile/createProfile",
        400,
        json!({ "error": "Profile exists" }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/sendVerificationCode"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .session()
        .signup("A", "B", "a@mit.edu", &secret("pw"))
        .await;

    assert!(result.is_err());
    assert!(client.session().identity().is_none());
    assert_eq!(client.session().state(), SessionState::Error);
    let status = client.session().status();
    assert_eq!(status.error.as_deref(), Some("Profile exists"));
    assert!(!status.loading);
}

// ── Verification ────────────────────────────────────────────────────

#[tokio::test]
async fn test_verify_code_false_records_error_without_raising() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/verifyCode",
        200,
        json!({ "verified": false }),
    )
    .await;

    let verified = client.session().verify_code("u1", "000000").await.unwrap();

    assert!(!verified);
    let status = client.session().status();
    assert_eq!(
        status.error.as_deref(),
        Some("Invalid or expired verification code.")
    );
    assert_eq!(status.info, None);
}

#[tokio::test]
async fn test_verify_code_true_records_info() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/verifyCode",
        200,
        json!({ "verified": true }),
    )
    .await;

    let verified = client.session().verify_code("u1", "123456").await.unwrap();

    assert!(verified);
    let status = client.session().status();
    assert_eq!(status.error, None);
    assert_eq!(
        status.info.as_deref(),
        Some("Email verified. You can now log in.")
    );
    assert_eq!(client.session().state(), SessionState::Verified);
}

#[tokio::test]
async fn test_verify_code_transport_failure_raises() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/verifyCode", 503, json!({})).await;

    let err = client
        .session()
        .verify_code("u1", "123456")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(
        client.session().status().error.as_deref(),
        Some("Request failed with status code 503")
    );
}

// ── Resend ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_resend_ignores_revoke_failure() {
    let (server, client, _) = setup().await;
    respond(
        &server,
        "/UserAuthentication/revokeVerification",
        404,
        json!({ "error": "No code" }),
    )
    .await;
    respond(&server, "/UserAuthentication/sendVerificationCode", 200, json!({})).await;

    let outcome = client
        .session()
        .resend_verification("u1", "a@mit.edu")
        .await
        .unwrap();

    assert_eq!(outcome, ResendOutcome::Sent);
    let status = client.session().status();
    assert_eq!(status.error, None);
    assert_eq!(status.info.as_deref(), Some("Verification code sent."));
}

#[tokio::test]
async fn test_resend_reclassifies_pending_code_as_info() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/revokeVerification", 200, json!({})).await;
    respond(
        &server,
        "/UserAuthentication/sendVerificationCode",
        400,
        json!({ "error": "An Unexpired Verification Code already exists for this user" }),
    )
    .await;

    let outcome = client
        .session()
        .resend_verification("u1", "a@mit.edu")
        .await
        .unwrap();

    assert_eq!(outcome, ResendOutcome::AlreadyPending);
    let status = client.session().status();
    assert_eq!(status.error, None);
    assert_eq!(
        status.info.as_deref(),
        Some(
            "A code was already sent recently. Please use it or wait a minute before requesting a new one."
        )
    );
}

#[tokio::test]
async fn test_resend_other_failure_raises() {
    let (server, client, _) = setup().await;
    respond(&server, "/UserAuthentication/revokeVerification", 200, json!({})).await;
    respond(
        &server,
        "/UserAuthentication/sendVerificationCode",
        400,
        json!({ "error": "Unknown user" }),
    )
    .await;

    let result = client
        .session()
        .resend_verification("u9", "x@mit.edu")
        .await;

    assert!(result.is_err());
    assert_eq!(
        client.session().status().error.as_deref(),
        Some("Unknown user")
    );
}

// ── Logout ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_clears_identity_without_network() {
    let (server, client, _) = setup().await;
    common::login_as_u1(&server, &client).await;
    let received_before = server.received_requests().await.unwrap().len();

    let mut identity_rx = client.session().handle().subscribe();
    client.session().logout();

    assert!(client.session().identity().is_none());
    assert!(identity_rx.borrow_and_update().is_none());
    assert_eq!(client.session().state(), SessionState::Anonymous);
    assert_eq!(client.session().status().info.as_deref(), Some("Logged out"));
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        received_before
    );
}
