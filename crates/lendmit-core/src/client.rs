// ── Client facade ──
//
// Wires one gateway, one persisted cache and the three synchronizers
// around a shared session handle. Cheap to clone.

use std::sync::Arc;

use lendmit_api::{ApiClient, TransportConfig};
use tracing::debug;

use crate::cache::{FileResourceCache, MemoryResourceCache, ResourceCache};
use crate::catalog::CatalogSync;
use crate::config::{CacheLocation, ClientConfig};
use crate::error::CoreError;
use crate::session::SessionManager;
use crate::subscriptions::SubscriptionSync;

/// Entry point for LendMIT clients.
///
/// The catalog and subscription synchronizers read the identity owned by
/// the session manager; none of them share any other state.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api: Arc<ApiClient>,
    session: SessionManager,
    catalog: CatalogSync,
    subscriptions: SubscriptionSync,
}

impl Client {
    /// Build a client, choosing the cache from `config.cache`.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let cache: Arc<dyn ResourceCache> = match &config.cache {
            CacheLocation::Directory(dir) => Arc::new(FileResourceCache::new(dir.clone())),
            CacheLocation::Memory => Arc::new(MemoryResourceCache::new()),
        };
        Self::with_cache(config, cache)
    }

    /// Build a client around a caller-supplied cache.
    pub fn with_cache(config: ClientConfig, cache: Arc<dyn ResourceCache>) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let api = ApiClient::new(config.base_url, config.endpoints, &transport)?;
        debug!(base_url = %api.base_url(), "client configured");
        Ok(Self::from_api(Arc::new(api), cache))
    }

    /// Build a client around an existing gateway.
    pub fn from_api(api: Arc<ApiClient>, cache: Arc<dyn ResourceCache>) -> Self {
        let session = SessionManager::new(Arc::clone(&api));
        let handle = session.handle();
        let catalog = CatalogSync::new(Arc::clone(&api), handle.clone(), cache);
        let subscriptions = SubscriptionSync::new(Arc::clone(&api), handle);
        Self {
            inner: Arc::new(ClientInner {
                api,
                session,
                catalog,
                subscriptions,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    pub fn catalog(&self) -> &CatalogSync {
        &self.inner.catalog
    }

    pub fn subscriptions(&self) -> &SubscriptionSync {
        &self.inner.subscriptions
    }
}
