// Following endpoints
//
// The followee listing has been observed in five different shapes across
// server versions; it is returned raw and normalized by the core crate.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{FollowPair, Follower};

impl ApiClient {
    /// Followees of `follower`, in whatever shape the server answers.
    pub async fn get_followees(&self, follower: &str) -> Result<Value, Error> {
        self.send_value(&self.endpoints().get_followees, &Follower { follower })
            .await
    }

    /// Subscribe `follower` to `followee`.
    pub async fn follow(&self, follower: &str, followee: &str) -> Result<(), Error> {
        self.send_value(
            &self.endpoints().follow,
            &FollowPair { follower, followee },
        )
        .await
        .map(drop)
    }

    /// Remove the subscription of `follower` to `followee`.
    pub async fn unfollow(&self, follower: &str, followee: &str) -> Result<(), Error> {
        self.send_value(
            &self.endpoints().unfollow,
            &FollowPair { follower, followee },
        )
        .await
        .map(drop)
    }

    /// Follow-status probe, answered as `{isFollowing}` or `[{isFollowing}]`.
    pub async fn is_following(&self, follower: &str, followee: &str) -> Result<Value, Error> {
        self.send_value(
            &self.endpoints().is_following,
            &FollowPair { follower, followee },
        )
        .await
    }
}
