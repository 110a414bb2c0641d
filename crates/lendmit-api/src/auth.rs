// UserAuthentication + UserProfile endpoints
//
// Credential registration, verification-code lifecycle, login and profile
// creation. Each method is a single exchange; sequencing and best-effort
// policy belong to the session manager in `lendmit-core`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateProfile, UserCode, UserEmail, UserOnly, UserResponse};

impl ApiClient {
    /// Register a credential pair, returning the new user id.
    pub async fn register_user(&self, email: &str, password: &SecretString) -> Result<String, Error> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        let resp: UserResponse = self.send(&self.endpoints().register_user, &body).await?;
        let user = require_user(resp)?;
        debug!(%user, "registered user");
        Ok(user)
    }

    /// Authenticate a credential pair, returning the user id.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<String, Error> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        let resp: UserResponse = self.send(&self.endpoints().login, &body).await?;
        require_user(resp)
    }

    /// Ask the server to email a verification code.
    pub async fn send_verification_code(&self, user: &str, email: &str) -> Result<(), Error> {
        self.send_value(
            &self.endpoints().send_verification_code,
            &UserEmail { user, email },
        )
        .await
        .map(drop)
    }

    /// Revoke any outstanding verification code for `user`.
    pub async fn revoke_verification(&self, user: &str) -> Result<(), Error> {
        self.send_value(&self.endpoints().revoke_verification, &UserOnly { user })
            .await
            .map(drop)
    }

    /// Submit a verification code. Returns the server's verified flag
    /// read loosely: `1` or `"true"` count, a missing flag does not.
    pub async fn verify_code(&self, user: &str, code: &str) -> Result<bool, Error> {
        let value = self
            .send_value(&self.endpoints().verify_code, &UserCode { user, code })
            .await?;
        Ok(value.get("verified").is_some_and(truthy))
    }

    /// Create the profile record tied to a registered user.
    pub async fn create_profile(&self, profile: &CreateProfile) -> Result<Value, Error> {
        self.send_value(&self.endpoints().create_profile, profile).await
    }
}

/// An identity answer must name a user.
fn require_user(resp: UserResponse) -> Result<String, Error> {
    if resp.user.trim().is_empty() {
        return Err(Error::Deserialization {
            message: "response carried an empty user id".into(),
            body: json!({ "user": resp.user }).to_string(),
        });
    }
    Ok(resp.user)
}

/// JavaScript-style truthiness for loosely typed server flags.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > f64::EPSILON),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
