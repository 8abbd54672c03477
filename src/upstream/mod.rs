//! Upstream Module
//!
//! Access to the single upstream data source. The [`UpstreamSource`] trait is
//! the seam between the data service and the network so that the service can
//! run against in-memory fakes.

mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProxyError, Result};
use crate::models::{QueryKey, RecordSet};

pub use client::UpstreamClient;

// == Upstream Source ==
/// Fetches raw, un-normalized records for a query key.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Performs one upstream request for `key`.
    ///
    /// Every failure (network, timeout, status, malformed body) is reported as
    /// [`ProxyError::UpstreamUnavailable`].
    async fn fetch(&self, key: QueryKey) -> Result<RecordSet>;
}

// == Payload Parsing ==
/// Interprets an upstream JSON body as a sequence of records.
///
/// The body must be an array whose elements are all objects.
pub fn parse_records(payload: Value) -> Result<RecordSet> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(ProxyError::UpstreamUnavailable(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(ProxyError::UpstreamUnavailable(format!(
                "row {} is {}, expected an object",
                index,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
