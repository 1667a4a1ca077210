//! Snapshot encoding
//!
//! Converts between a store snapshot and its on-disk JSON form.

use serde_json::{Map, Value};

use crate::entry::EntryId;
use crate::error::{Result, SnapError};
use crate::store::Snapshot;

/// Result of decoding a snapshot file
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    /// Entries whose keys are valid ids
    pub entries: Snapshot,

    /// Keys that were dropped because they are not valid ids
    pub skipped_keys: Vec<String>,

    /// Keys that spell an id already seen in another case or form
    pub duplicate_keys: Vec<String>,
}

/// Encode a snapshot as pretty-printed JSON (two-space indent, UTF-8)
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a snapshot file
///
/// Fails with `CorruptSnapshot` if the bytes are not JSON or the top-level
/// value is not an object. Keys that do not parse as ids are skipped.
/// When several keys name the same id, one value is kept and the other keys
/// are listed in `duplicate_keys`.
pub fn decode_snapshot(bytes: &[u8]) -> Result<DecodedSnapshot> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| SnapError::CorruptSnapshot(format!("invalid JSON: {}", e)))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(SnapError::CorruptSnapshot(format!(
                "expected a JSON object at top level, found {}",
                kind_of(&other)
            )))
        }
    };

    Ok(collect_entries(object))
}

fn collect_entries(object: Map<String, Value>) -> DecodedSnapshot {
    let mut decoded = DecodedSnapshot::default();

    for (key, data) in object {
        match EntryId::parse(&key) {
            Some(id) => {
                if decoded.entries.insert(id, data).is_some() {
                    decoded.duplicate_keys.push(key);
                }
            }
            None => decoded.skipped_keys.push(key),
        }
    }

    decoded
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
