//! Store Module
//!
//! The in-memory mapping of entry ids to JSON documents.
//!
//! ## Responsibilities
//! - Single source of truth for all entries while the process runs
//! - CRUD operations for the request layer
//! - Point-in-time copies for the persistence layer
//!
//! ## Data Structure Choice
//! A `HashMap` behind one `parking_lot::RwLock`:
//! - O(1) expected lookups and mutations
//! - Readers share the lock, mutations and snapshot copies never interleave
//! - Copies are returned as a `BTreeMap` so snapshots serialize in id order

mod table;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::entry::EntryId;

pub use table::Store;

/// A value-level copy of the store, ordered by id
pub type Snapshot = BTreeMap<EntryId, Value>;
