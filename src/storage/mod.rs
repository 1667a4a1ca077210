//! Storage Module
//!
//! Durable snapshots of the store.
//!
//! ## Responsibilities
//! - Serialize the whole store as one JSON document
//! - Rotate the previous snapshot into a timestamped backup before each write
//! - Write the new snapshot atomically (temp file + rename)
//! - Recover the latest snapshot on startup, discarding corrupt files
//!
//! ## Directory Layout
//! ```text
//! {data_dir}/
//! ├── db.json                   primary snapshot (latest save)
//! ├── db_backup_1700000000.json previous primary, renamed at that second
//! ├── db_backup_1700000060.json
//! └── ...                       backups are never pruned
//! ```
//!
//! ## Snapshot Format
//! A pretty-printed JSON object keyed by entry id, keys in sorted order:
//! ```text
//! {
//!   "0b9e...": "hi",
//!   "4f1c...": { "nested": [1, 2, 3] }
//! }
//! ```

mod snapshot;
mod manager;

pub use snapshot::{decode_snapshot, encode_snapshot, DecodedSnapshot};
pub use manager::{SaveReport, SnapshotManager};
