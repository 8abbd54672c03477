//! OHLCV Proxy - A read-through caching proxy for tabular market statistics
//!
//! Fetches rows from a single upstream host, normalizes them to a uniform key
//! set and serves them as JSON, keeping each result for a short TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod service;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::DataService;
pub use upstream::{UpstreamClient, UpstreamSource};
