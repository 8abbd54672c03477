//! Cache Store Module
//!
//! Read-through TTL cache mapping query keys to normalized record sets.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};
use crate::models::{QueryKey, RecordSet};

// == Cache Store ==
/// TTL cache over the fixed key space of upstream queries.
///
/// There is no eviction: a stale entry stays until the next `store` for its
/// key replaces it. Callers serialize access through one exclusive lock.
#[derive(Debug)]
pub struct CacheStore {
    /// Cached record sets by query key
    entries: HashMap<QueryKey, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Freshness window
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Lookup ==
    /// Returns a copy of the cached records if the entry for `key` is fresh.
    ///
    /// An absent or stale entry yields `None`; a stale entry is left in place.
    pub fn lookup(&mut self, key: QueryKey) -> Option<RecordSet> {
        match self.entries.get(&key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                debug!(%key, age_ms = entry.age().as_millis() as u64, "cache hit");
                self.stats.record_hit();
                Some(entry.records.clone())
            }
            Some(entry) => {
                debug!(%key, age_ms = entry.age().as_millis() as u64, "cache entry stale");
                self.stats.record_stale();
                None
            }
            None => {
                debug!(%key, "cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Store ==
    /// Replaces any entry for `key` with `records`, stamped now.
    pub fn store(&mut self, key: QueryKey, records: RecordSet) {
        self.entries.insert(key, CacheEntry::new(records));
        self.stats.record_store();
    }

    // == Stats ==
    /// Returns current cache statistics, with the entry count taken from the map.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
