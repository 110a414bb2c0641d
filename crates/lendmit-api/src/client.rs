// API HTTP client
//
// Wraps `reqwest::Client` with base-address URL construction and uniform
// response classification. Every endpoint is a JSON POST; endpoint modules
// (auth, resources, following) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::endpoints::Endpoints;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Request Gateway for the concept API.
///
/// `send` issues one request/response exchange and classifies the
/// outcome: a structured value, a transport failure, or a server error.
/// No retries happen at this layer.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(
        base_url: Url,
        endpoints: Endpoints,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            endpoints,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, endpoints: Endpoints) -> Self {
        Self {
            http,
            base_url,
            endpoints,
        }
    }

    /// The API base address.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resolved endpoint table.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an endpoint path against the base address.
    ///
    /// Plain concatenation rather than `Url::join`: the base usually ends
    /// in `/api` without a trailing slash, which `join` would drop.
    pub fn url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST `payload` to `endpoint` and decode the answer as `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let value = self.send_value(endpoint, payload).await?;
        serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }

    /// POST `payload` to `endpoint` and return the raw structured answer.
    ///
    /// Used where the server's response shape is not stable and the
    /// caller matches it against several tolerated patterns.
    pub async fn send_value(
        &self,
        endpoint: &str,
        payload: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let resp = self.http.post(url.clone()).json(payload).send().await?;
        self.handle_response(url, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(&self, url: Url, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(status = status.as_u16(), len = body.len(), "response received");

        if !status.is_success() {
            let message = error_field(&body).unwrap_or_else(|| synthesized_message(status));
            return Err(Error::Server {
                status: status.as_u16(),
                message,
                url: url.to_string(),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        // Concept actions may report failure as `{"error": "..."}` with a 2xx.
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(Error::Server {
                status: status.as_u16(),
                message: message.to_owned(),
                url: url.to_string(),
            });
        }

        Ok(value)
    }
}

/// Extract the server's `error` field from a raw error body.
fn error_field(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}

fn synthesized_message(status: reqwest::StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}
