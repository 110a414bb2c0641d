// ── Catalog synchronizer ──
//
// Mirrors the member's own listings ("mine") and the browsing feed. The
// owned listing walks a fallback chain of server queries and ends at the
// persisted cache; the feed falls back to the owned listing. Intent
// metadata is fetched lazily and never persisted.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use lendmit_api::ApiClient;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cache::{ResourceCache, upsert_cached};
use crate::convert::{IntentShape, normalize_listing};
use crate::error::CoreError;
use crate::model::Resource;
use crate::session::SessionHandle;
use crate::status::{StatusCell, SyncStatus};
use crate::step::{BestEffort, best_effort, first_recognized};
use crate::store::OrderedCollection;
use crate::stream::EntityStream;

/// Where a refreshed listing came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// A server query answered with a recognized listing.
    Server { endpoint: String },
    /// Every server candidate failed; the persisted cache was used.
    Cache,
    /// The feed query failed; the owned listing was reused.
    OwnedFallback,
}

impl fmt::Display for ListingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server { endpoint } => write!(f, "server ({endpoint})"),
            Self::Cache => f.write_str("cache"),
            Self::OwnedFallback => f.write_str("owned listing"),
        }
    }
}

pub struct CatalogSync {
    api: Arc<ApiClient>,
    session: SessionHandle,
    cache: Arc<dyn ResourceCache>,
    mine: OrderedCollection<Resource>,
    feed: OrderedCollection<Resource>,
    /// `None` value: fetched, no intent recorded.
    intents: DashMap<String, Option<String>>,
    status: StatusCell,
}

impl CatalogSync {
    pub fn new(api: Arc<ApiClient>, session: SessionHandle, cache: Arc<dyn ResourceCache>) -> Self {
        Self {
            api,
            session,
            cache,
            mine: OrderedCollection::new(),
            feed: OrderedCollection::new(),
            intents: DashMap::new(),
            status: StatusCell::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mine(&self) -> Arc<Vec<Resource>> {
        self.mine.snapshot()
    }

    pub fn feed(&self) -> Arc<Vec<Resource>> {
        self.feed.snapshot()
    }

    pub fn subscribe_mine(&self) -> EntityStream<Resource> {
        EntityStream::new(self.mine.subscribe())
    }

    pub fn subscribe_feed(&self) -> EntityStream<Resource> {
        EntityStream::new(self.feed.subscribe())
    }

    pub fn status(&self) -> SyncStatus {
        self.status.snapshot()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Cached intent: `None` if never fetched, `Some(None)` if fetched
    /// and absent.
    pub fn intent(&self, resource_id: &str) -> Option<Option<String>> {
        self.intents.get(resource_id).map(|entry| entry.value().clone())
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Reload the owned listing.
    ///
    /// Tries each owner-listing endpoint in order and keeps the first
    /// recognized answer; when all fail, reads the persisted cache.
    /// Returns `None` without doing anything when signed out.
    pub async fn refresh_owned(&self) -> Option<ListingSource> {
        let user = self.session.user_id()?;
        let _loading = self.status.begin();

        let api = &self.api;
        let owner = user.as_str();
        let candidates = api.endpoints().owned_listing_candidates();
        let chain = first_recognized(candidates, |endpoint| async move {
            let value = api.list_owned_via(endpoint, owner).await?;
            Ok::<_, CoreError>(normalize_listing(&value))
        })
        .await;

        let (list, source) = match chain {
            Ok((endpoint, list)) => (
                list,
                ListingSource::Server {
                    endpoint: endpoint.to_owned(),
                },
            ),
            Err(exhausted) => {
                debug!(%exhausted, user = owner, "owned listing falls back to cache");
                let list = self.cache.load(owner).unwrap_or_else(|e| {
                    warn!(error = %e, "cache read failed");
                    self.status.set_error(e.user_message("Failed to load resources"));
                    Vec::new()
                });
                (list, ListingSource::Cache)
            }
        };

        self.mine.replace(list);
        Some(source)
    }

    /// Reload the feed from the global listing, or reuse the owned
    /// listing when that query fails.
    pub async fn refresh_feed(&self) -> ListingSource {
        let _loading = self.status.begin();

        let listing = match self.api.list_resources().await {
            Ok(value) => normalize_listing(&value),
            Err(e) => {
                debug!(error = %e, "global listing failed");
                None
            }
        };

        match listing {
            Some(list) => {
                self.feed.replace(list);
                ListingSource::Server {
                    endpoint: self.api.endpoints().list_resources.clone(),
                }
            }
            None => {
                self.feed.replace(self.mine.snapshot().as_ref().clone());
                ListingSource::OwnedFallback
            }
        }
    }

    /// Insert a freshly created resource at the front of both listings
    /// and write it through to the current member's persisted cache.
    ///
    /// The in-memory listings are authoritative for the session; a failed
    /// cache write is returned as `Ignored` and otherwise has no effect.
    pub fn add_local(&self, resource: Resource) -> BestEffort<()> {
        self.mine.prepend_if_absent(resource.clone());
        self.feed.prepend_if_absent(resource.clone());

        match self.session.user_id() {
            Some(user) => BestEffort::from_result(
                "persist resource",
                upsert_cached(self.cache.as_ref(), &user, &resource),
            ),
            None => BestEffort::Done(()),
        }
    }

    /// Look up a resource's intent. Any failure or unrecognized answer
    /// records the intent as absent.
    pub async fn fetch_intent(&self, resource_id: &str) -> Option<String> {
        let intent = best_effort("fetch intent", self.api.get_intent(resource_id))
            .await
            .ok()
            .as_ref()
            .and_then(IntentShape::recognize)
            .map(IntentShape::into_intent);

        self.intents.insert(resource_id.to_owned(), intent.clone());
        intent
    }

    /// Record an intent without asking the server.
    pub fn set_intent_local(&self, resource_id: &str, intent: Option<String>) {
        self.intents.insert(resource_id.to_owned(), intent);
    }
}
