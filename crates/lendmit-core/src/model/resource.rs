// ── Resource domain type ──

use serde::{Deserialize, Serialize};

use super::category::Category;

/// A lendable item listed by a member.
///
/// Created by the server and mirrored locally; the client only appends
/// or replaces by `id`, never mutates or deletes. `owner` is a weak
/// reference to an [`Identity`](super::Identity) id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            name: name.into(),
            category: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The category, if it is one of the known vocabulary.
    pub fn known_category(&self) -> Option<Category> {
        self.category.as_deref()?.parse().ok()
    }
}
