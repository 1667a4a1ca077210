//! Protocol codec
//!
//! Turns raw request input into typed values.
//!
//! ## Payload Rules
//! - The body must parse as a single JSON value
//! - A JSON `null` body is rejected, so `null` is never stored through the API
//! - An empty body is rejected
//!
//! ## Id Rules
//! - Hyphenated or simple UUIDs in any case are accepted and normalized to
//!   lowercase hyphenated form
//! - Anything else decodes to `None` and is answered like an unknown id

use serde_json::Value;

use crate::entry::EntryId;
use crate::error::{Result, SnapError};

/// Maximum accepted body size (16 MB)
///
/// Enforced by the router's body limit; larger bodies get a 413 before they
/// reach `decode_payload`.
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Decode a request body into a JSON document
pub fn decode_payload(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(SnapError::InvalidPayload("empty body".to_string()));
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => Err(SnapError::InvalidPayload(
            "null is not a storable value".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(SnapError::InvalidPayload(e.to_string())),
    }
}

/// Decode an id taken from a request path
pub fn decode_id(raw: &str) -> Option<EntryId> {
    EntryId::parse(raw)
}
