//! Record flattening
//!
//! Converts the vendor's nested JSON records into a normalized long-format
//! row set: one [`FlatRow`] per (record, attribute) pair. Nested objects
//! unpack into dotted paths (`details.color`), arrays into dotted index
//! paths (`images.0.url`). The `primaryId` becomes the row-grouping key and
//! is always a string, even when the vendor returns it as a number.

mod rows;

pub use rows::{id_to_string, FlatRow, ResultTable};

use serde_json::Value;

/// Flatten a sequence of records into long-format rows.
///
/// Record order is preserved; within a record, attributes appear in the
/// order serde_json yields them. An empty input yields an empty output.
pub fn flatten_records(records: &[Value]) -> Vec<FlatRow> {
    records.iter().flat_map(flatten_record).collect()
}

/// Flatten one record. The top-level `primaryId` field is the grouping key
/// and is not itself emitted as an attribute row.
pub fn flatten_record(record: &Value) -> Vec<FlatRow> {
    let primary_id = record.get("primaryId").map(id_to_string).unwrap_or_default();

    let mut pairs = Vec::new();
    match record {
        Value::Object(map) => {
            for (key, value) in map {
                if key == "primaryId" {
                    continue;
                }
                flatten_into(key, value, &mut pairs);
            }
        }
        // Non-object records should not occur; keep them as a single row
        // rather than dropping them
        other => pairs.push(("value".to_string(), other.clone())),
    }

    pairs
        .into_iter()
        .map(|(attribute, value)| FlatRow::new(primary_id.clone(), attribute, value))
        .collect()
}

/// Recursively unpack a value into (dotted path, leaf value) pairs
fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            if map.is_empty() {
                out.push((prefix.to_string(), value.clone()));
                return;
            }
            for (key, nested) in map {
                flatten_into(&format!("{prefix}.{key}"), nested, out);
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                out.push((prefix.to_string(), value.clone()));
                return;
            }
            for (index, item) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}.{index}"), item, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.clone())),
    }
}
