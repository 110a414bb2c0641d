// ── Core error types ──
//
// User-facing errors from lendmit-core. The `From<lendmit_api::Error>` impl
// folds the gateway's failure modes into the client taxonomy: validation
// (never reaches the network), transport, and server errors. Exhausted
// fallback chains are not errors at this level; see `step::FallbackExhausted`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Locally detected bad input, e.g. an empty followee.
    #[error("{message}")]
    Validation { message: String },

    /// Network unreachable, timeout, or malformed payload.
    #[error("{message}")]
    Transport {
        message: String,
        status: Option<u16>,
        url: Option<String>,
        timed_out: bool,
    },

    /// Structured error returned by the server.
    #[error("{message}")]
    Server {
        message: String,
        status: u16,
        url: String,
    },

    /// An operation needing the current identity ran while signed out.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Persisted cache could not be read or written.
    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Resolved request URL, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Server { url, .. } => Some(url),
            Self::Transport { url, .. } => url.as_deref(),
            _ => None,
        }
    }

    /// The transport gave up waiting for the server.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timed_out: true, .. })
    }

    /// Short human-readable text for the observable error field.
    ///
    /// Falls back to `fallback` when the failure carried no text.
    pub fn user_message(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_owned()
        } else {
            msg
        }
    }

    /// The user message annotated with HTTP status and request URL:
    /// `"{msg} (HTTP {status}) at {url}"`, or `"{msg} at {url}"` when
    /// no status is known. `fallback_url` is used when the failure did
    /// not record one.
    pub fn annotated_message(&self, fallback: &str, fallback_url: &str) -> String {
        let msg = self.user_message(fallback);
        let url = self.url().unwrap_or(fallback_url);
        match self.status() {
            Some(status) => format!("{msg} (HTTP {status}) at {url}"),
            None => format!("{msg} at {url}"),
        }
    }

    /// Rewrite the message of a transport/server failure into its
    /// annotated form, so the re-raised error reads the same as the
    /// recorded one.
    #[must_use]
    pub fn annotate(self, fallback: &str, fallback_url: &str) -> Self {
        let annotated = self.annotated_message(fallback, fallback_url);
        match self {
            Self::Server { status, url, .. } => Self::Server {
                message: annotated,
                status,
                url,
            },
            Self::Transport {
                status,
                url,
                timed_out,
                ..
            } => Self::Transport {
                message: annotated,
                status,
                url: url.or_else(|| Some(fallback_url.to_owned())),
                timed_out,
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lendmit_api::Error> for CoreError {
    fn from(err: lendmit_api::Error) -> Self {
        match err {
            lendmit_api::Error::Server {
                status,
                message,
                url,
            } => CoreError::Server {
                message,
                status,
                url,
            },
            lendmit_api::Error::Transport(ref e) => CoreError::Transport {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
                url: e.url().map(ToString::to_string),
                timed_out: e.is_timeout(),
            },
            lendmit_api::Error::Deserialization { message, body: _ } => CoreError::Transport {
                message: format!("Malformed response: {message}"),
                status: None,
                url: None,
                timed_out: false,
            },
            lendmit_api::Error::Tls(message) => CoreError::Transport {
                message,
                status: None,
                url: None,
                timed_out: false,
            },
            lendmit_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
        }
    }
}
