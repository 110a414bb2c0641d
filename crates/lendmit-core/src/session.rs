// ── Session manager ──
//
// Drives registration → profile creation → verification code → login and
// owns the signed-in identity. The identity is published through a
// `watch` channel; the other synchronizers read it via `SessionHandle`.

use std::sync::Arc;

use lendmit_api::{ApiClient, CreateProfile};
use secrecy::SecretString;
use strum::Display;
use tokio::sync::watch;
use tracing::info;

use crate::error::CoreError;
use crate::model::Identity;
use crate::status::{StatusCell, SyncStatus};
use crate::step::best_effort;

const LOGGED_IN: &str = "Logged in successfully.";
const ACCOUNT_CREATED: &str = "Account created. Please check your email for a verification code.";
const CODE_SENT: &str = "Verification code sent.";
const CODE_PENDING: &str =
    "A code was already sent recently. Please use it or wait a minute before requesting a new one.";
const EMAIL_VERIFIED: &str = "Email verified. You can now log in.";
const CODE_REJECTED: &str = "Invalid or expired verification code.";
const LOGGED_OUT: &str = "Logged out";

/// Where the session stands in the signup / verify / login sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    Registering,
    ProfilePending,
    CodeSent,
    Verified,
    Authenticated,
    /// The last operation failed; the caller may retry it.
    Error,
}

/// Outcome of [`SessionManager::resend_verification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    /// A fresh code was sent.
    Sent,
    /// The server still holds an unexpired code; nothing new was sent.
    AlreadyPending,
}

/// The server signals an outstanding code only through its message text.
fn code_already_pending(message: &str) -> bool {
    message
        .to_ascii_lowercase()
        .contains("unexpired verification code already exists")
}

// ── Read-only identity handle ────────────────────────────────────────

/// Read-only view of the current identity, shared with the catalog and
/// subscription synchronizers.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Option<Identity>>,
}

impl SessionHandle {
    pub fn identity(&self) -> Option<Identity> {
        self.rx.borrow().clone()
    }

    /// Id of the signed-in member, if any.
    pub fn user_id(&self) -> Option<String> {
        self.rx.borrow().as_ref().map(|identity| identity.id.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.rx.clone()
    }
}

// ── SessionManager ───────────────────────────────────────────────────

pub struct SessionManager {
    api: Arc<ApiClient>,
    identity: watch::Sender<Option<Identity>>,
    state: watch::Sender<SessionState>,
    status: StatusCell,
}

impl SessionManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (identity, _) = watch::channel(None);
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self {
            api,
            identity,
            state,
            status: StatusCell::new(),
        }
    }

    /// A read-only identity handle for other synchronizers.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.identity.subscribe(),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn status(&self) -> SyncStatus {
        self.status.snapshot()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Authenticate and set the identity from the returned id and the
    /// supplied email. On failure the state is left unchanged.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Identity, CoreError> {
        let _loading = self.status.begin();

        let user = match self.api.login(email, password).await {
            Ok(user) => user,
            Err(e) => {
                let err = CoreError::from(e);
                self.status.set_error(err.user_message("Login failed"));
                return Err(err);
            }
        };

        let identity = Identity::new(user, email);
        self.identity.send_replace(Some(identity.clone()));
        self.transition(SessionState::Authenticated);
        self.status.set_info(LOGGED_IN);
        Ok(identity)
    }

    /// Register, create the profile, then request a verification code.
    ///
    /// Registration and profile creation are critical: failure aborts and
    /// leaves the identity unset. Sending the code is best-effort; when it
    /// fails the session stays in `ProfilePending`.
    pub async fn signup(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, CoreError> {
        let _loading = self.status.begin();
        self.transition(SessionState::Registering);

        let user = self
            .api
            .register_user(email, password)
            .await
            .map_err(|e| self.fail(e.into(), "Sign up failed"))?;
        self.transition(SessionState::ProfilePending);

        self.api
            .create_profile(&CreateProfile::new(&user, first_name, last_name))
            .await
            .map_err(|e| self.fail(e.into(), "Sign up failed"))?;

        let code_sent = best_effort(
            "send verification code",
            self.api.send_verification_code(&user, email),
        )
        .await
        .is_done();

        let identity = Identity::new(user, email).with_names(first_name, last_name);
        self.identity.send_replace(Some(identity.clone()));
        if code_sent {
            self.transition(SessionState::CodeSent);
        }
        self.status.set_info(ACCOUNT_CREATED);
        Ok(identity)
    }

    /// Revoke any outstanding code (best-effort) and request a new one.
    ///
    /// A server answer saying an unexpired code already exists is reported
    /// as information, not as an error.
    pub async fn resend_verification(
        &self,
        user: &str,
        email: &str,
    ) -> Result<ResendOutcome, CoreError> {
        let _loading = self.status.begin();

        let _revoked = best_effort("revoke verification", self.api.revoke_verification(user)).await;

        match self.api.send_verification_code(user, email).await {
            Ok(()) => {
                self.transition(SessionState::CodeSent);
                self.status.set_info(CODE_SENT);
                Ok(ResendOutcome::Sent)
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = err.user_message("Failed to send verification code");
                if code_already_pending(&message) {
                    self.status.clear_error();
                    self.status.set_info(CODE_PENDING);
                    self.transition(SessionState::CodeSent);
                    return Ok(ResendOutcome::AlreadyPending);
                }
                Err(self.fail(err, "Failed to send verification code"))
            }
        }
    }

    /// Submit a verification code. A rejected code records an error but
    /// is not raised; the flag is returned either way.
    pub async fn verify_code(&self, user: &str, code: &str) -> Result<bool, CoreError> {
        let _loading = self.status.begin();

        let verified = self
            .api
            .verify_code(user, code)
            .await
            .map_err(|e| self.fail(e.into(), "Verification failed"))?;

        if verified {
            self.transition(SessionState::Verified);
            self.status.set_info(EMAIL_VERIFIED);
        } else {
            self.transition(SessionState::Error);
            self.status.set_error(CODE_REJECTED);
        }
        Ok(verified)
    }

    /// Forget the identity. No network call.
    pub fn logout(&self) {
        self.identity.send_replace(None);
        self.transition(SessionState::Anonymous);
        self.status.set_messages(None, Some(LOGGED_OUT.to_owned()));
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn fail(&self, err: CoreError, fallback: &str) -> CoreError {
        self.status.set_error(err.user_message(fallback));
        self.transition(SessionState::Error);
        err
    }

    fn transition(&self, to: SessionState) {
        let from = self.state.send_replace(to);
        if from != to {
            info!(%from, %to, "session state");
        }
    }
}
