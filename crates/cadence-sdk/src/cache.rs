//! Query cache keyed by logical collection
//!
//! Entries are raw JSON bodies held in a moka cache whose time-to-live is the
//! freshness window. Invalidation evicts the entry outright.

use cadence_domain::CloneId;
use moka::sync::Cache;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Upper bound on cached queries; one list plus a DNA body per source.
const MAX_ENTRIES: u64 = 256;

/// Logical query identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The list of clones (`GET /api/clones`)
    ClonesList,
    /// One clone's DNA profile (`GET /api/clones/{id}/dna`)
    Dna(CloneId),
}

/// Shared cache of query results
pub struct QueryCache {
    stale_after: Duration,
    entries: Cache<QueryKey, Value>,
    invalidations: Mutex<HashMap<QueryKey, u64>>,
}

impl QueryCache {
    /// Create a cache whose entries stay fresh for `stale_after`
    pub fn new(stale_after: Duration) -> Self {
        let mut builder = Cache::builder().max_capacity(MAX_ENTRIES);
        if !stale_after.is_zero() {
            builder = builder.time_to_live(stale_after);
        }
        let entries = builder.build();

        Self {
            stale_after,
            entries,
            invalidations: Mutex::new(HashMap::new()),
        }
    }

    /// Cached value, if present and still fresh
    pub fn get_fresh(&self, key: &QueryKey) -> Option<Value> {
        self.entries.get(key)
    }

    /// Store a freshly fetched value
    ///
    /// A zero freshness window disables caching.
    pub fn insert(&self, key: QueryKey, value: Value) {
        if self.stale_after.is_zero() {
            return;
        }
        self.entries.insert(key, value);
    }

    /// Evict a query so the next read re-fetches it
    ///
    /// Counted even when nothing is cached under `key` yet.
    pub fn invalidate(&self, key: &QueryKey) {
        self.entries.invalidate(key);
        *lock(&self.invalidations).entry(key.clone()).or_insert(0) += 1;
        debug!(?key, "Query invalidated");
    }

    /// How many times `key` has been invalidated
    pub fn invalidation_count(&self, key: &QueryKey) -> u64 {
        lock(&self.invalidations).get(key).copied().unwrap_or(0)
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_STALE_AFTER_SECS))
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_after", &self.stale_after)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

// Poisoning is ignored: counters are plain data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_then_get() {
        let cache = QueryCache::default();
        cache.insert(QueryKey::ClonesList, json!({"items": [], "total": 0}));
        assert_eq!(
            cache.get_fresh(&QueryKey::ClonesList),
            Some(json!({"items": [], "total": 0}))
        );
    }

    #[test]
    fn test_invalidate_evicts_and_counts() {
        let cache = QueryCache::default();
        cache.insert(QueryKey::ClonesList, json!([]));
        cache.invalidate(&QueryKey::ClonesList);
        assert!(cache.get_fresh(&QueryKey::ClonesList).is_none());
        assert_eq!(cache.invalidation_count(&QueryKey::ClonesList), 1);

        cache.insert(QueryKey::ClonesList, json!([1]));
        assert_eq!(cache.get_fresh(&QueryKey::ClonesList), Some(json!([1])));
    }

    #[test]
    fn test_zero_window_is_always_stale() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.insert(QueryKey::ClonesList, json!([]));
        assert!(cache.get_fresh(&QueryKey::ClonesList).is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = QueryCache::default();
        let dna = QueryKey::Dna(CloneId::new("c1").unwrap());
        cache.insert(dna.clone(), json!({"tone": 10}));
        cache.invalidate(&QueryKey::ClonesList);
        assert!(cache.get_fresh(&dna).is_some());
        assert_eq!(cache.invalidation_count(&dna), 0);
    }

    #[test]
    fn test_entry_expires_after_window() {
        let cache = QueryCache::new(Duration::from_millis(20));
        cache.insert(QueryKey::ClonesList, json!([]));
        assert!(cache.get_fresh(&QueryKey::ClonesList).is_some());

        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get_fresh(&QueryKey::ClonesList).is_none());
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = QueryCache::default();
        let dna = QueryKey::Dna(CloneId::new("c1").unwrap());
        cache.insert(QueryKey::ClonesList, json!([]));
        cache.insert(dna.clone(), json!({"tone": 10}));

        cache.clear();

        assert!(cache.get_fresh(&QueryKey::ClonesList).is_none());
        assert!(cache.get_fresh(&dna).is_none());
        assert_eq!(cache.invalidation_count(&dna), 0);
    }
}
