//! TTL cache of serialized search results
//!
//! Entries are keyed by the raw query text as typed by the caller and hold
//! a JSON-encoded hit list. Every entry shares one fixed time-to-live;
//! after expiry an entry is treated as absent. The cache is advisory: a
//! miss simply falls through to the store.

use moka::future::Cache;
use std::time::Duration;

/// Prefix shared by all search result cache keys
const KEY_PREFIX: &str = "search_results:";

/// In-process TTL cache of serialized query results
pub struct ResultCache {
    entries: Cache<String, String>,
}

impl ResultCache {
    /// Creates a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Builds the cache key for a query
    ///
    /// The key uses the query exactly as typed (case and whitespace
    /// preserved), not the normalized form used for store lookups, so
    /// queries differing only in case or whitespace miss the cache.
    pub fn key_for(raw_query: &str) -> String {
        format!("{}{}", KEY_PREFIX, raw_query)
    }

    /// Returns the cached payload for a key, if present and unexpired
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).await
    }

    /// Stores a serialized payload under a key
    pub async fn put(&self, key: String, payload: String) {
        self.entries.insert(key, payload).await;
    }

    /// Number of live entries (approximate, for diagnostics)
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
