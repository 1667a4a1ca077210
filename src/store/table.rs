//! Store implementation
//!
//! HashMap-based store with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::entry::{generate_id, Entry, EntryId};
use crate::error::{Result, SnapError};

use super::Snapshot;

/// In-memory store for all entries
///
/// ## Concurrency:
/// - `entries`: one RwLock guards the whole map
/// - `get`/`list_all` share the read lock
/// - `create`/`update`/`delete` take the write lock
/// - All methods use `&self` so the store can sit behind an `Arc`
pub struct Store {
    entries: RwLock<HashMap<EntryId, Value>>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            entries: RwLock::new(snapshot.into_iter().collect()),
        }
    }

    /// Copy the full mapping
    ///
    /// The copy is taken under the read lock, so it reflects a single instant
    /// and is unaffected by later writes.
    pub fn list_all(&self) -> Snapshot {
        let entries = self.entries.read();
        entries
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect()
    }

    /// Get the document stored under `id`
    pub fn get(&self, id: &EntryId) -> Option<Value> {
        self.entries.read().get(id).cloned()
    }

    /// True if `id` is in the store
    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.read().contains_key(id)
    }

    /// Get by a raw id string
    ///
    /// Malformed ids are reported as absent, same as unknown ones.
    pub fn get_str(&self, id: &str) -> Option<Value> {
        EntryId::parse(id).and_then(|id| self.get(&id))
    }

    /// Store a new document under a freshly generated id
    pub fn create(&self, data: Value) -> Entry {
        let id = generate_id();
        self.entries.write().insert(id, data.clone());
        tracing::trace!(%id, "entry created");
        Entry::new(id, data)
    }

    /// Replace the document stored under `id`
    ///
    /// Returns `NotFound` if `id` is not in the store.
    pub fn update(&self, id: &EntryId, data: Value) -> Result<Entry> {
        let mut entries = self.entries.write();
        match entries.get_mut(id) {
            Some(slot) => {
                *slot = data.clone();
                tracing::trace!(%id, "entry updated");
                Ok(Entry::new(*id, data))
            }
            None => Err(SnapError::NotFound),
        }
    }

    /// Remove the entry stored under `id`
    ///
    /// Returns `NotFound` if `id` is not in the store, including on a
    /// second delete of the same id.
    pub fn delete(&self, id: &EntryId) -> Result<()> {
        match self.entries.write().remove(id) {
            Some(_) => {
                tracing::trace!(%id, "entry deleted");
                Ok(())
            }
            None => Err(SnapError::NotFound),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
