//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and stores.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from a fresh entry
    pub hits: u64,
    /// Number of lookups that found nothing usable (absent or stale)
    pub misses: u64,
    /// Misses where an entry existed but was past its TTL
    pub stale: u64,
    /// Number of entries written after an upstream fetch
    pub stores: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter for an absent entry.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Stale ==
    /// Records a miss caused by an expired entry.
    pub fn record_stale(&mut self) {
        self.misses += 1;
        self.stale += 1;
    }

    // == Record Store ==
    /// Increments the store counter.
    pub fn record_store(&mut self) {
        self.stores += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
