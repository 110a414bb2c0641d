// Request and response payloads
//
// Only the stable shapes are modelled here. Listing, intent and following
// responses vary between server versions and are returned as raw
// `serde_json::Value` for the core crate to match.

use serde::{Deserialize, Serialize};

/// Answer of `registerUser` and `login`: the opaque user id.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub user: String,
}

/// Body of `createProfile`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub user: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub thumbnail: Option<String>,
}

impl CreateProfile {
    /// A fresh profile with names only; bio and thumbnail start empty.
    pub fn new(user: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            user: user.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            bio: None,
            thumbnail: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UserEmail<'a> {
    pub user: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserOnly<'a> {
    pub user: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserCode<'a> {
    pub user: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Owner<'a> {
    pub owner: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourceRef<'a> {
    pub resource: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Follower<'a> {
    pub follower: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FollowPair<'a> {
    pub follower: &'a str,
    pub followee: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_profile_uses_camel_case_and_nulls() {
        let body = serde_json::to_value(CreateProfile::new("u1", "Ada", "Lovelace")).unwrap();
        assert_eq!(
            body,
            json!({
                "user": "u1",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "bio": null,
                "thumbnail": null
            })
        );
    }
}
