// ── Runtime client configuration ──
//
// Describes *where* the API lives and where per-user state is persisted.
// Never touches disk itself; the CLI builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use lendmit_api::Endpoints;
use url::Url;

/// API root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Where the persisted resource cache lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheLocation {
    /// One JSON file per member inside this directory.
    Directory(PathBuf),
    /// Process memory only; nothing survives a restart.
    #[default]
    Memory,
}

/// Configuration for talking to one LendMIT backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8000/api`.
    pub base_url: Url,
    /// Endpoint path table.
    pub endpoints: Endpoints,
    /// Request timeout.
    pub timeout: Duration,
    pub cache: CacheLocation,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(30),
            cache: CacheLocation::Memory,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = CacheLocation::Directory(dir.into());
        self
    }
}
