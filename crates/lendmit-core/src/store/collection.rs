// ── Generic ordered reactive collection ──
//
// One `watch` channel carries the whole snapshot. Mutations go through
// `send_if_modified`, so subscribers only wake on real changes.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Resource;

/// Entities stored in an [`OrderedCollection`] are unique by this key.
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Resource {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

/// An ordered list of entities, unique by [`Keyed::key`].
pub(crate) struct OrderedCollection<T: Keyed + Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Vec<T>>>,
}

impl<T: Keyed + Clone + Send + Sync + 'static> OrderedCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the whole collection. Later duplicates of a key are dropped;
    /// entities with an empty key are all kept.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let mut seen = HashSet::new();
        let items: Vec<T> = items
            .into_iter()
            .filter(|item| item.key().is_empty() || seen.insert(item.key().to_owned()))
            .collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(items));
    }

    /// Insert at the front unless the key is present. Returns `true` if inserted.
    pub(crate) fn prepend_if_absent(&self, item: T) -> bool {
        self.snapshot.send_if_modified(|snap| {
            if snap.iter().any(|e| e.key() == item.key()) {
                return false;
            }
            Arc::make_mut(snap).insert(0, item);
            true
        })
    }

    /// Insert at the back unless the key is present. Returns `true` if inserted.
    pub(crate) fn append_if_absent(&self, item: T) -> bool {
        self.snapshot.send_if_modified(|snap| {
            if snap.iter().any(|e| e.key() == item.key()) {
                return false;
            }
            Arc::make_mut(snap).push(item);
            true
        })
    }

    /// Remove every entity with `key`. Returns `true` if anything was removed.
    pub(crate) fn remove(&self, key: &str) -> bool {
        self.snapshot.send_if_modified(|snap| {
            if !snap.iter().any(|e| e.key() == key) {
                return false;
            }
            Arc::make_mut(snap).retain(|e| e.key() != key);
            true
        })
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.snapshot.borrow().iter().any(|e| e.key() == key)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.subscribe()
    }
}
