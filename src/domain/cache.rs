use lru::LruCache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;

use super::Result;

/// Connectors keyed by what produced them, usually the exact directive
/// string.
///
/// Entries are never removed unless a capacity is set, in which case the
/// least recently used key is evicted first.
pub struct ConnectorCache<K, C> {
    entries: Mutex<LruCache<K, C>>,
}

impl<K: Hash + Eq, C: Clone> ConnectorCache<K, C> {
    pub fn unbounded() -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the connector stored under `key`, building and storing it with
    /// `build` on first use.
    ///
    /// Lookup and insert share one lock: `build` runs at most once per key
    /// even when several requests hit a new directive together. A failing
    /// `build` stores nothing.
    pub async fn get_or_create<F>(&self, key: K, build: F) -> Result<C>
    where
        F: FnOnce() -> Result<C>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(existing) = entries.get(&key) {
            return Ok(existing.clone());
        }

        let created = build()?;
        entries.put(key, created.clone());
        Ok(created)
    }

    pub async fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.lock().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<K: Hash + Eq, C: Clone> Default for ConnectorCache<K, C> {
    fn default() -> Self {
        Self::unbounded()
    }
}
