// Endpoint path table
//
// Every logical endpoint the client consumes, resolved relative to the
// configured base address. Paths are configuration-resolvable: callers may
// re-root the Following group or override single endpoints.

/// Default prefix for the Following concept.
pub const DEFAULT_FOLLOWING_PREFIX: &str = "/Following";

/// Resolved endpoint paths, each starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    // UserAuthentication
    pub register_user: String,
    pub send_verification_code: String,
    pub revoke_verification: String,
    pub verify_code: String,
    pub login: String,

    // UserProfile
    pub create_profile: String,

    // Resource / ResourceIntent
    pub list_resources_by_owner: String,
    pub list_by_owner: String,
    pub list_resources: String,
    pub get_intent: String,

    // Following
    pub get_followees: String,
    pub follow: String,
    pub unfollow: String,
    pub is_following: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            register_user: "/UserAuthentication/registerUser".into(),
            send_verification_code: "/UserAuthentication/sendVerificationCode".into(),
            revoke_verification: "/UserAuthentication/revokeVerification".into(),
            verify_code: "/UserAuthentication/verifyCode".into(),
            login: "/UserAuthentication/login".into(),
            create_profile: "/UserProfile/createProfile".into(),
            list_resources_by_owner: "/Resource/listResourcesByOwner".into(),
            list_by_owner: "/Resource/listByOwner".into(),
            list_resources: "/Resource/listResources".into(),
            get_intent: "/ResourceIntent/getIntent".into(),
            get_followees: format!("{DEFAULT_FOLLOWING_PREFIX}/getFollowees"),
            follow: format!("{DEFAULT_FOLLOWING_PREFIX}/follow"),
            unfollow: format!("{DEFAULT_FOLLOWING_PREFIX}/unfollow"),
            is_following: format!("{DEFAULT_FOLLOWING_PREFIX}/isFollowing"),
        }
    }
}

impl Endpoints {
    /// Normalize a user-supplied endpoint path.
    ///
    /// Trims whitespace, strips a pasted `/api/` prefix (the base address
    /// already ends in `/api`), and guarantees a leading `/`. Blank input
    /// yields `None`.
    pub fn normalize_path(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let stripped = trimmed.strip_prefix("/api").filter(|rest| rest.starts_with('/'));
        let path = stripped.unwrap_or(trimmed);
        if path.starts_with('/') {
            Some(path.to_owned())
        } else {
            Some(format!("/{path}"))
        }
    }

    /// Re-root every Following endpoint under `prefix`.
    ///
    /// Blank prefixes leave the table untouched.
    pub fn with_following_prefix(mut self, prefix: &str) -> Self {
        if let Some(prefix) = Self::normalize_path(prefix) {
            let prefix = prefix.trim_end_matches('/');
            self.get_followees = format!("{prefix}/getFollowees");
            self.follow = format!("{prefix}/follow");
            self.unfollow = format!("{prefix}/unfollow");
            self.is_following = format!("{prefix}/isFollowing");
        }
        self
    }

    /// Override the getFollowees path (ignored when blank).
    pub fn with_get_followees(mut self, path: &str) -> Self {
        if let Some(p) = Self::normalize_path(path) {
            self.get_followees = p;
        }
        self
    }

    /// Override the follow path (ignored when blank).
    pub fn with_follow(mut self, path: &str) -> Self {
        if let Some(p) = Self::normalize_path(path) {
            self.follow = p;
        }
        self
    }

    /// Override the unfollow path (ignored when blank).
    pub fn with_unfollow(mut self, path: &str) -> Self {
        if let Some(p) = Self::normalize_path(path) {
            self.unfollow = p;
        }
        self
    }

    /// The ordered candidate queries for "resources owned by X".
    ///
    /// The server's listing surface is not guaranteed stable, so more
    /// than one endpoint shape is tried.
    pub fn owned_listing_candidates(&self) -> [&str; 2] {
        [&self.list_resources_by_owner, &self.list_by_owner]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_api_prefix_and_adds_slash() {
        assert_eq!(
            Endpoints::normalize_path("/api/Following/follow").as_deref(),
            Some("/Following/follow")
        );
        assert_eq!(
            Endpoints::normalize_path("  Following/follow ").as_deref(),
            Some("/Following/follow")
        );
        assert_eq!(
            Endpoints::normalize_path("/apiary/list").as_deref(),
            Some("/apiary/list")
        );
        assert_eq!(Endpoints::normalize_path("   "), None);
    }

    #[test]
    fn following_prefix_reroots_group() {
        let eps = Endpoints::default().with_following_prefix("/api/Subscriptions/");
        assert_eq!(eps.get_followees, "/Subscriptions/getFollowees");
        assert_eq!(eps.follow, "/Subscriptions/follow");
        assert_eq!(eps.unfollow, "/Subscriptions/unfollow");
        assert_eq!(eps.is_following, "/Subscriptions/isFollowing");
        assert_eq!(eps.login, "/UserAuthentication/login");
    }

    #[test]
    fn single_override_wins_over_prefix() {
        let eps = Endpoints::default()
            .with_following_prefix("Subs")
            .with_follow("/Custom/follow")
            .with_unfollow("");
        assert_eq!(eps.follow, "/Custom/follow");
        assert_eq!(eps.unfollow, "/Subs/unfollow");
    }

    #[test]
    fn owned_candidates_are_ordered() {
        let eps = Endpoints::default();
        assert_eq!(
            eps.owned_listing_candidates(),
            ["/Resource/listResourcesByOwner", "/Resource/listByOwner"]
        );
    }
}
