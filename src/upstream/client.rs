//! Upstream HTTP client
//!
//! A single pooled `reqwest::Client`, built at startup and shared by every
//! request. Cloning the client shares its connection pool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{QueryKey, RecordSet};
use crate::upstream::{parse_records, UpstreamSource};

/// Path of the OHLCV statistics table on the upstream host.
const STATISTICS_PATH: &str = "/OHLCV_Statistics";
/// Path of the calendar table on the upstream host.
const CALENDARS_PATH: &str = "/Calendars";

/// Idle connections kept open per upstream host.
const POOL_MAX_IDLE_PER_HOST: usize = 8;
/// How long an idle pooled connection is kept.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    asset_class: String,
    timeout: Duration,
    client: Client,
}

impl UpstreamClient {
    /// Builds the client for `base_url` with a per-request `timeout`.
    ///
    /// # Arguments
    /// * `base_url` - Upstream host, e.g. `http://91.99.137.123:3456`
    /// * `asset_class` - `Asset_Class` value for statistics requests
    /// * `timeout` - Bound on each upstream request, connect included
    pub fn new(base_url: &str, asset_class: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProxyError::Internal(format!(
                "Invalid upstream base URL: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        if timeout.is_zero() {
            return Err(ProxyError::Internal(
                "Upstream timeout must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Created upstream client: base_url='{}', timeout={}s",
            base_url,
            timeout.as_secs()
        );

        Ok(Self {
            base_url,
            asset_class: asset_class.to_string(),
            timeout,
            client,
        })
    }

    /// Builds the client from the proxy configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.upstream_base_url,
            &config.asset_class,
            config.upstream_timeout(),
        )
    }

    /// GETs `path` with `query` and decodes the body as JSON.
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending upstream request to {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProxyError::UpstreamUnavailable(format!(
                        "request to {} timed out after {}s",
                        url,
                        self.timeout.as_secs()
                    ))
                } else {
                    ProxyError::UpstreamUnavailable(format!("request to {} failed: {}", url, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamUnavailable(format!(
                "{} returned status {}",
                url, status
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            ProxyError::UpstreamUnavailable(format!("malformed JSON from {}: {}", url, e))
        })
    }
}

#[async_trait]
impl UpstreamSource for UpstreamClient {
    async fn fetch(&self, key: QueryKey) -> Result<RecordSet> {
        let payload = match key {
            QueryKey::Statistics(interval) => {
                self.get_json(
                    STATISTICS_PATH,
                    &[
                        ("Asset_Class", self.asset_class.as_str()),
                        ("Interval", interval.as_str()),
                    ],
                )
                .await
            }
            QueryKey::Calendars => self.get_json(CALENDARS_PATH, &[]).await,
        };

        let records = payload.and_then(parse_records).map_err(|e| {
            warn!(%key, "Upstream fetch failed: {}", e);
            e
        })?;

        debug!(%key, rows = records.len(), "Upstream fetch succeeded");
        Ok(records)
    }
}
