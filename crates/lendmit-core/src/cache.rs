// ── Persisted resource cache ──
//
// Last-resort read fallback for the owned listing and write-through target
// for locally created resources. One entry per user id.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Resource;

/// Storage for per-user resource lists that outlives the process.
pub trait ResourceCache: Send + Sync {
    /// Read the cached list for `user`. A missing entry is an empty list.
    fn load(&self, user: &str) -> Result<Vec<Resource>, CoreError>;

    /// Overwrite the cached list for `user`.
    fn store(&self, user: &str, resources: &[Resource]) -> Result<(), CoreError>;
}

/// Storage key for a user's cached listing.
pub fn cache_key(user: &str) -> String {
    format!("myResources:{user}")
}

/// Upsert `resource` by id into the user's cached list: replace in place
/// when present, otherwise insert at the front.
pub(crate) fn upsert_cached(
    cache: &dyn ResourceCache,
    user: &str,
    resource: &Resource,
) -> Result<(), CoreError> {
    let mut list = cache.load(user)?;
    match list.iter_mut().find(|r| r.id == resource.id) {
        Some(existing) => existing.clone_from(resource),
        None => list.insert(0, resource.clone()),
    }
    cache.store(user, &list)
}

// ── File-backed cache ────────────────────────────────────────────────

/// One JSON file per user inside a cache directory.
#[derive(Debug, Clone)]
pub struct FileResourceCache {
    dir: PathBuf,
}

impl FileResourceCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `user`'s entry. ASCII letters, digits and `-` are kept;
    /// every other byte of the key, `_` included, becomes `_xx` (lowercase
    /// hex), so distinct users never share a file.
    pub fn entry_path(&self, user: &str) -> PathBuf {
        let mut name = String::new();
        for byte in cache_key(user).bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02x}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

fn cache_error(path: &Path, e: &impl std::fmt::Display) -> CoreError {
    CoreError::Cache {
        message: format!("{}: {e}", path.display()),
    }
}

impl ResourceCache for FileResourceCache {
    fn load(&self, user: &str) -> Result<Vec<Resource>, CoreError> {
        let path = self.entry_path(user);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cached listing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(cache_error(&path, &e)),
        };
        match serde_json::from_str(&text) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache entry; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn store(&self, user: &str, resources: &[Resource]) -> Result<(), CoreError> {
        let path = self.entry_path(user);
        std::fs::create_dir_all(&self.dir).map_err(|e| cache_error(&self.dir, &e))?;
        let json = serde_json::to_string_pretty(resources).map_err(|e| cache_error(&path, &e))?;
        std::fs::write(&path, json).map_err(|e| cache_error(&path, &e))
    }
}

// ── In-memory cache ──────────────────────────────────────────────────

/// Process-local cache, for tests and setups without a cache directory.
#[derive(Debug, Default)]
pub struct MemoryResourceCache {
    entries: DashMap<String, Vec<Resource>>,
}

impl MemoryResourceCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceCache for MemoryResourceCache {
    fn load(&self, user: &str) -> Result<Vec<Resource>, CoreError> {
        Ok(self
            .entries
            .get(&cache_key(user))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn store(&self, user: &str, resources: &[Resource]) -> Result<(), CoreError> {
        self.entries.insert(cache_key(user), resources.to_vec());
        Ok(())
    }
}
