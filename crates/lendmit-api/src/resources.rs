// Resource + ResourceIntent endpoints
//
// Listing responses come back either as a bare array or wrapped in
// `{ resources: [...] }`, and intent lookups as `{ intent }` or
// `[{ intent }]`. These methods hand back the raw value untouched.

use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Owner, ResourceRef};

impl ApiClient {
    /// Query one owned-listing endpoint (`endpoint` is one of
    /// [`Endpoints::owned_listing_candidates`](crate::Endpoints::owned_listing_candidates)).
    pub async fn list_owned_via(&self, endpoint: &str, owner: &str) -> Result<Value, Error> {
        self.send_value(endpoint, &Owner { owner }).await
    }

    /// Global listing of every resource.
    pub async fn list_resources(&self) -> Result<Value, Error> {
        self.send_value(&self.endpoints().list_resources, &json!({}))
            .await
    }

    /// Intent metadata for a single resource.
    pub async fn get_intent(&self, resource: &str) -> Result<Value, Error> {
        self.send_value(&self.endpoints().get_intent, &ResourceRef { resource })
            .await
    }
}
