//! Cache Entry Module
//!
//! Defines a cached record set together with the instant it was fetched.

use std::time::Duration;

use tokio::time::Instant;

use crate::models::RecordSet;

// == Cache Entry ==
/// A normalized record set and the time of the upstream fetch that produced it.
///
/// Entries are replaced as a whole on refresh, never updated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The normalized records
    pub records: RecordSet,
    /// When the records were fetched
    pub fetched_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            fetched_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the fetch.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.fetched_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> RecordSet {
        serde_json::from_value(json!([{"Symbol": "ES", "Close": 5321.5}])).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_within_ttl() {
        let entry = CacheEntry::new(sample_records());

        tokio::time::advance(Duration::from_secs(29)).await;

        assert!(entry.is_fresh(Duration::from_secs(30)));
        assert_eq!(entry.records.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_stale_at_boundary() {
        let entry = CacheEntry::new(sample_records());

        tokio::time::advance(Duration::from_secs(30)).await;

        assert!(!entry.is_fresh(Duration::from_secs(30)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_age() {
        let entry = CacheEntry::new(Vec::new());

        tokio::time::advance(Duration::from_millis(1500)).await;

        assert_eq!(entry.age(), Duration::from_millis(1500));
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let entry = CacheEntry::new(sample_records());
        assert!(!entry.is_fresh(Duration::ZERO));
    }
}
