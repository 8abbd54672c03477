//! Domain types and HTTP DTOs for the proxy
//!
//! Interval selectors and cache keys, the loosely-typed record shapes coming
//! from upstream, and the request/response bodies of the public API.

pub mod interval;
pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use interval::{Interval, QueryKey};
pub use record::{Record, RecordSet};
pub use requests::DataQuery;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
