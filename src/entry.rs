//! Entry Model
//!
//! Identity and payload of a stored document.
//!
//! Every entry is an `(id, data)` pair. Ids are random UUID-v4 values rendered
//! in lowercase hyphenated form. They are never checked against the store for
//! collisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::SnapError;

/// Identifier of a stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    const HYPHENATED_LEN: usize = 36;
    const SIMPLE_LEN: usize = 32;

    /// Parse an id from user input
    ///
    /// Accepts a UUID in hyphenated (36 chars) or simple (32 chars) form, in
    /// any case. Braced, URN and padded forms return `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.len() {
            Self::HYPHENATED_LEN | Self::SIMPLE_LEN => Uuid::try_parse(input).ok().map(Self),
            _ => None,
        }
    }

    /// Access the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntryId {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| SnapError::InvalidPayload(format!("invalid entry id: {:?}", s)))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical form: lowercase, hyphenated
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Generate a fresh entry id
pub fn generate_id() -> EntryId {
    EntryId(Uuid::new_v4())
}

/// A stored document and its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub data: Value,
}

impl Entry {
    pub fn new(id: EntryId, data: Value) -> Self {
        Self { id, data }
    }
}
