//! Row Normalization Module
//!
//! Makes every record of a fetched record set share one key set so that the
//! grid renderer can build columns from any row.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::{Record, RecordSet};


// == Public Constants ==
/// Default cap on rows kept from an upstream payload
pub const MAX_ROWS: usize = 50;

// == Column Keys ==
/// Returns the union of keys across `records`, in order of first appearance.
pub fn column_keys(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                keys.push(key.clone());
            }
        }
    }

    keys
}

// == Normalize ==
/// Truncates `records` to `max_rows`, then gives every record the full key set.
///
/// Each output record lists its keys in [`column_keys`] order, with `null` for
/// keys it lacked. Values present in the input are never altered. An empty
/// input yields an empty output with no synthetic columns.
pub fn normalize_rows(mut records: RecordSet, max_rows: usize) -> RecordSet {
    records.truncate(max_rows);

    let keys = column_keys(&records);
    for record in records.iter_mut() {
        if record.keys().eq(keys.iter()) {
            continue;
        }
        let mut fields = std::mem::take(record);
        for key in &keys {
            let value = fields.remove(key).unwrap_or(Value::Null);
            record.insert(key.clone(), value);
        }
    }

    records
}
