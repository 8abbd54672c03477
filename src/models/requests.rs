//! Request DTOs for the proxy API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

use crate::error::{ProxyError, Result};
use crate::models::Interval;

/// Query string for GET /data
///
/// The selector is kept as a raw string so that unknown values surface as
/// `InvalidInterval` instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    /// Interval selector, e.g. `Last` or `15M`
    #[serde(default)]
    pub interval: Option<String>,
}

impl DataQuery {
    /// Validates the selector against the supported set.
    pub fn interval(&self) -> Result<Interval> {
        match self.interval.as_deref() {
            Some(raw) => raw.parse(),
            None => Err(ProxyError::InvalidInterval(
                "missing 'interval' query parameter".to_string(),
            )),
        }
    }
}
