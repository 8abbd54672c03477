//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream host serving the statistics and calendar tables.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://91.99.137.123:3456";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream data source, without trailing slash
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// `Asset_Class` value sent with statistics requests
    pub asset_class: String,
    /// Cache freshness window in seconds
    pub cache_ttl: u64,
    /// Maximum rows kept from an upstream payload
    pub max_rows: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_BASE_URL` - Upstream host (default: http://91.99.137.123:3456)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds, zero ignored (default: 30)
    /// - `ASSET_CLASS` - Asset class for statistics requests (default: Futures)
    /// - `CACHE_TTL` - Cache freshness window in seconds (default: 30)
    /// - `MAX_ROWS` - Row cap applied before normalization (default: 50)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT")
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(defaults.upstream_timeout),
            asset_class: env::var("ASSET_CLASS")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.asset_class),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            max_rows: parse_var("MAX_ROWS").unwrap_or(defaults.max_rows),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 30,
            asset_class: "Futures".to_string(),
            cache_ttl: 30,
            max_rows: crate::normalize::MAX_ROWS,
            server_port: 8000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
