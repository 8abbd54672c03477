//! Record shapes
//!
//! Upstream rows have no fixed schema; a record is an ordered JSON object
//! whose keys are discovered per fetch.

use serde_json::{Map, Value};

/// One row: field name to scalar value, keys kept in insertion order.
pub type Record = Map<String, Value>;

/// An ordered sequence of records.
pub type RecordSet = Vec<Record>;
