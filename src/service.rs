//! Data Service
//!
//! Read-through path shared by the data endpoints:
//! cache lookup, then on a miss upstream fetch, normalize and store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{QueryKey, RecordSet};
use crate::normalize::normalize_rows;
use crate::upstream::UpstreamSource;

/// Owns the cache and the upstream handle for the lifetime of the server.
///
/// The cache lock is never held across the upstream call. Two concurrent
/// misses on the same key may therefore both fetch; the later store wins.
/// A refresh runs on its own task and completes even if the caller goes away.
pub struct DataService {
    cache: Arc<Mutex<CacheStore>>,
    upstream: Arc<dyn UpstreamSource>,
    max_rows: usize,
}

impl DataService {
    /// Creates a service with an empty cache.
    ///
    /// # Arguments
    /// * `upstream` - Source of raw records
    /// * `ttl` - Cache freshness window
    /// * `max_rows` - Row cap applied before normalization
    pub fn new(upstream: Arc<dyn UpstreamSource>, ttl: Duration, max_rows: usize) -> Self {
        Self {
            cache: Arc::new(Mutex::new(CacheStore::new(ttl))),
            upstream,
            max_rows,
        }
    }

    /// Creates a service using the TTL and row cap from `config`.
    pub fn from_config(upstream: Arc<dyn UpstreamSource>, config: &Config) -> Self {
        Self::new(upstream, config.cache_ttl(), config.max_rows)
    }

    // == Records ==
    /// Returns the normalized records for `key`, fetching on a miss.
    ///
    /// A failed fetch leaves the cache untouched and is returned as-is.
    pub async fn records(&self, key: QueryKey) -> Result<RecordSet> {
        let cached = self.cache.lock().await.lookup(key);
        if let Some(records) = cached {
            return Ok(records);
        }

        let cache = Arc::clone(&self.cache);
        let upstream = Arc::clone(&self.upstream);
        let max_rows = self.max_rows;

        // Dropping the JoinHandle detaches the task, so the store still happens
        let refresh = tokio::spawn(async move {
            let raw = upstream.fetch(key).await?;
            let fetched = raw.len();
            let records = normalize_rows(raw, max_rows);

            cache.lock().await.store(key, records.clone());
            info!(%key, fetched, kept = records.len(), "Refreshed cache entry");

            Ok::<_, ProxyError>(records)
        });

        refresh.await.map_err(|e| {
            warn!(%key, "Cache refresh task failed: {}", e);
            ProxyError::Internal(format!("refresh of {} did not complete: {}", key, e))
        })?
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let stats = self.cache.lock().await.stats();
        debug!(hits = stats.hits, misses = stats.misses, "Cache stats requested");
        stats
    }
}
