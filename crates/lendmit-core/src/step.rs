// ── Step outcomes and fallback chains ──
//
// Critical steps are plain `Result<T, CoreError>` and propagate with `?`.
// Best-effort steps produce a `BestEffort<T>`: the failure is logged and
// kept for inspection but never propagated. Fallback chains try an ordered
// list of candidates and report exhaustion as `FallbackExhausted`, which the
// caller resolves into a default instead of surfacing to the user.

use std::fmt::Display;
use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::CoreError;

/// Result of a step whose failure the caller deliberately ignores.
#[derive(Debug)]
#[must_use]
pub enum BestEffort<T> {
    Done(T),
    Ignored(CoreError),
}

impl<T> BestEffort<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Ignored(_) => None,
        }
    }

    /// Classify a finished step, logging and absorbing a failure.
    pub fn from_result<E>(step: &'static str, result: Result<T, E>) -> Self
    where
        E: Into<CoreError>,
    {
        match result {
            Ok(value) => Self::Done(value),
            Err(e) => {
                let err = e.into();
                warn!(step, error = %err, "best-effort step failed; continuing");
                Self::Ignored(err)
            }
        }
    }
}

/// Run a best-effort step, logging and absorbing any failure.
pub async fn best_effort<T, E>(
    step: &'static str,
    fut: impl Future<Output = Result<T, E>>,
) -> BestEffort<T>
where
    E: Into<CoreError>,
{
    BestEffort::from_result(step, fut.await)
}

/// Every candidate in a fallback chain failed or returned an
/// unrecognized shape.
#[derive(Debug, Error)]
#[error("all {attempts} candidate queries failed")]
pub struct FallbackExhausted {
    pub attempts: usize,
}

/// Try each candidate in order and return the first that both succeeds
/// and yields a recognized value (`Ok(Some(_))`).
///
/// `Ok(None)` from `attempt` means the request succeeded but the answer
/// had an unrecognized shape; it counts as a failed candidate.
pub async fn first_recognized<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<(C, T), FallbackExhausted>
where
    C: Display + Clone,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Option<T>, CoreError>>,
{
    let mut attempts = 0;
    for candidate in candidates {
        attempts += 1;
        match attempt(candidate.clone()).await {
            Ok(Some(value)) => return Ok((candidate, value)),
            Ok(None) => debug!(%candidate, "candidate answered with unrecognized shape"),
            Err(e) => debug!(%candidate, error = %e, "candidate failed"),
        }
    }
    Err(FallbackExhausted { attempts })
}
