#![allow(clippy::unwrap_used, dead_code)]
// Shared wiremock fixtures for the synchronizer tests.

use std::sync::Arc;

use lendmit_core::{Client, ClientConfig, MemoryResourceCache, ResourceCache};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup() -> (MockServer, Client, Arc<MemoryResourceCache>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let cache = Arc::new(MemoryResourceCache::new());
    let client = Client::with_cache(ClientConfig::new(base_url), cache.clone()).unwrap();
    (server, client, cache)
}

/// Like [`setup`], with a caller-supplied cache.
pub async fn setup_with_cache(cache: Arc<dyn ResourceCache>) -> (MockServer, Client) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = Client::with_cache(ClientConfig::new(base_url), cache).unwrap();
    (server, client)
}

pub fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

pub async fn respond(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/api{endpoint}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Sign in as `u1` so per-user operations have an identity.
pub async fn login_as_u1(server: &MockServer, client: &Client) {
    respond(server, "/UserAuthentication/login", 200, json!({ "user": "u1" })).await;
    client
        .session()
        .login("a@mit.edu", &secret("pw"))
        .await
        .unwrap();
}
