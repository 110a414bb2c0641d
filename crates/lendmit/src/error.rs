//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use lendmit_config::ConfigError;
use lendmit_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the LendMIT API at {url}")]
    #[diagnostic(
        code(lendmit::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             Reason: {reason}\n\
             Try: lendmit --base-url http://localhost:8000/api login"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(lendmit::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.\n{reason}")
    )]
    Timeout { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lendmit::auth_failed),
        help(
            "Verify the email and password for profile '{profile}'.\n\
             New accounts must be verified first: lendmit verify --user <id> <code>"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(lendmit::no_credentials),
        help(
            "Configure credentials with: lendmit config init\n\
             Or pass --email and set LENDMIT_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Not signed in")]
    #[diagnostic(code(lendmit::not_signed_in), help("Run: lendmit login"))]
    NotSignedIn,

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(lendmit::api_error))]
    Api { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(lendmit::code_rejected),
        help("Request a new code with: lendmit resend-code --user <id>")
    )]
    CodeRejected { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lendmit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lendmit::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: lendmit config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(lendmit::config))]
    Config(ConfigError),

    #[error("Local cache error: {message}")]
    #[diagnostic(code(lendmit::cache))]
    Cache { message: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::NotSignedIn => {
                exit_code::AUTH
            }
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Reinterpret a server rejection as an authentication failure.
    pub fn into_auth_failure(self, profile: &str) -> Self {
        match self {
            Self::Api { message } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            other => other,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            ref e @ CoreError::Transport { .. } if e.is_timeout() => Self::Timeout {
                reason: e.to_string(),
            },

            CoreError::Transport { message, url, .. } => Self::ConnectionFailed {
                url: url.unwrap_or_else(|| "(unknown)".into()),
                reason: message,
            },

            CoreError::Server { message, .. } => Self::Api { message },

            CoreError::NotAuthenticated => Self::NotSignedIn,

            CoreError::Cache { message } => Self::Cache { message },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::Api { message },
        }
    }
}
