use thiserror::Error;

/// Top-level error type for the `lendmit-api` crate.
///
/// Every exchange with the server fails in one of two broad ways: the
/// transport never produced a usable payload (unreachable host, timeout,
/// malformed body), or the server answered with a structured error.
/// `lendmit-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client-builder failure.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Server ──────────────────────────────────────────────────────
    /// Structured error answered by the server.
    ///
    /// `message` is the server's own `error` field when the body carried
    /// one, otherwise a generic message synthesized from the status.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        url: String,
    },
}

impl Error {
    /// HTTP status attached to this failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The fully resolved request URL, when known.
    pub fn url(&self) -> Option<String> {
        match self {
            Self::Server { url, .. } => Some(url.clone()),
            Self::Transport(e) => e.url().map(ToString::to_string),
            _ => None,
        }
    }

    /// The server-supplied error message, if the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a structured answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Deserialization { .. } | Self::Tls(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_exposes_status_and_url() {
        let err = Error::Server {
            status: 409,
            message: "already following".into(),
            url: "http://localhost:8000/api/Following/follow".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            err.url().as_deref(),
            Some("http://localhost:8000/api/Following/follow")
        );
        assert_eq!(err.server_message(), Some("already following"));
        assert_eq!(err.to_string(), "already following");
        assert!(!err.is_transport());
    }

    #[test]
    fn deserialization_counts_as_transport() {
        let err = Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.url(), None);
    }
}
