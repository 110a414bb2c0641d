// ── Subscription synchronizer ──
//
// Mirrors the followee list for one follower. Follow and unfollow update
// the mirror optimistically after the server accepts the request, then
// reconcile with a full refresh whose answer wins.

use std::sync::Arc;

use lendmit_api::ApiClient;
use tokio::sync::watch;
use tracing::warn;

use crate::convert::{FollowStatusShape, normalize_followees};
use crate::error::CoreError;
use crate::session::SessionHandle;
use crate::status::{StatusCell, SyncStatus};
use crate::step::best_effort;
use crate::store::OrderedCollection;
use crate::stream::EntityStream;

const IDS_REQUIRED: &str = "Follower and followee are required.";
const UNSUBSCRIBED: &str = "Unsubscribed.";

/// How the server answered a follow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Subscribed,
    /// The follow-status check said the subscription is not active yet.
    AwaitingConfirmation,
}

impl FollowOutcome {
    pub fn message(self, followee: &str) -> String {
        match self {
            Self::Subscribed => format!("Subscribed to {followee}."),
            Self::AwaitingConfirmation => {
                format!("Subscribe requested for {followee}. Awaiting confirmation.")
            }
        }
    }
}

pub struct SubscriptionSync {
    api: Arc<ApiClient>,
    session: SessionHandle,
    followees: OrderedCollection<String>,
    status: StatusCell,
}

impl SubscriptionSync {
    pub fn new(api: Arc<ApiClient>, session: SessionHandle) -> Self {
        Self {
            api,
            session,
            followees: OrderedCollection::new(),
            status: StatusCell::new(),
        }
    }

    pub fn followees(&self) -> Arc<Vec<String>> {
        self.followees.snapshot()
    }

    pub fn is_followed(&self, followee: &str) -> bool {
        self.followees.contains(followee)
    }

    pub fn subscribe_followees(&self) -> EntityStream<String> {
        EntityStream::new(self.followees.subscribe())
    }

    pub fn status(&self) -> SyncStatus {
        self.status.snapshot()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Rebuild the followee list from the server. Any unrecognized answer
    /// shape yields an empty list.
    pub async fn refresh(&self, follower: &str) -> Result<Arc<Vec<String>>, CoreError> {
        let _loading = self.status.begin();
        self.reconcile(follower).await
    }

    /// [`refresh`](Self::refresh) for the signed-in member.
    pub async fn refresh_current(&self) -> Result<Arc<Vec<String>>, CoreError> {
        let follower = self.session.user_id().ok_or(CoreError::NotAuthenticated)?;
        self.refresh(&follower).await
    }

    /// Follow `followee`, then confirm with the follow-status check and
    /// reconcile.
    ///
    /// A failed follow request is recorded and returned with its status
    /// and URL; the mirror is untouched in that case. Failures of the
    /// status check or the reconciling refresh do not fail the call.
    pub async fn follow(&self, follower: &str, followee: &str) -> Result<FollowOutcome, CoreError> {
        let _loading = self.status.begin();
        let (follower, followee) = self.validate(follower, followee)?;

        if let Err(e) = self.api.follow(follower, followee).await {
            let endpoint = &self.api.endpoints().follow;
            return Err(self.fail(e.into(), "Failed to subscribe", endpoint));
        }

        self.followees.append_if_absent(followee.to_owned());

        let outcome = match best_effort(
            "follow status check",
            self.api.is_following(follower, followee),
        )
        .await
        .ok()
        {
            Some(value) => match FollowStatusShape::recognize(&value) {
                Some(shape) if shape.is_following() => FollowOutcome::Subscribed,
                _ => FollowOutcome::AwaitingConfirmation,
            },
            None => FollowOutcome::Subscribed,
        };
        self.status.set_info(outcome.message(followee));

        if self.reconcile(follower).await.is_err() {
            warn!(follower, followee, "reconciling refresh after follow failed");
        }
        Ok(outcome)
    }

    /// Unfollow `followee`, then reconcile.
    pub async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), CoreError> {
        let _loading = self.status.begin();
        let (follower, followee) = self.validate(follower, followee)?;

        if let Err(e) = self.api.unfollow(follower, followee).await {
            let endpoint = &self.api.endpoints().unfollow;
            return Err(self.fail(e.into(), "Failed to unsubscribe", endpoint));
        }

        self.followees.remove(followee);
        self.status.set_info(UNSUBSCRIBED);

        if self.reconcile(follower).await.is_err() {
            warn!(follower, followee, "reconciling refresh after unfollow failed");
        }
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Replace the mirror with the server's list. Leaves the info message
    /// alone so a preceding follow/unfollow message survives.
    async fn reconcile(&self, follower: &str) -> Result<Arc<Vec<String>>, CoreError> {
        match self.api.get_followees(follower).await {
            Ok(value) => {
                self.followees.replace(normalize_followees(&value));
                Ok(self.followees.snapshot())
            }
            Err(e) => {
                let endpoint = &self.api.endpoints().get_followees;
                Err(self.fail(e.into(), "Failed to load followees", endpoint))
            }
        }
    }

    /// Trimmed, non-empty identifiers, or a recorded validation error.
    fn validate<'a>(
        &self,
        follower: &'a str,
        followee: &'a str,
    ) -> Result<(&'a str, &'a str), CoreError> {
        let (follower, followee) = (follower.trim(), followee.trim());
        if follower.is_empty() || followee.is_empty() {
            self.status.set_error(IDS_REQUIRED);
            return Err(CoreError::validation(IDS_REQUIRED));
        }
        Ok((follower, followee))
    }

    fn fail(&self, err: CoreError, fallback: &str, endpoint: &str) -> CoreError {
        let url = self
            .api
            .url(endpoint)
            .map_or_else(|_| endpoint.to_owned(), String::from);
        let err = err.annotate(fallback, &url);
        self.status.set_error(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_messages() {
        assert_eq!(FollowOutcome::Subscribed.message("u2"), "Subscribed to u2.");
        assert_eq!(
            FollowOutcome::AwaitingConfirmation.message("u2"),
            "Subscribe requested for u2. Awaiting confirmation."
        );
    }
}
