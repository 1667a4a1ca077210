//! # SnapKV
//!
//! A small HTTP key-value store for JSON documents with:
//! - Generated UUID-v4 ids
//! - Whole-store JSON snapshots written on an interval and on shutdown
//! - A timestamped backup of the previous snapshot on every save
//! - Recovery from the latest snapshot on startup
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server (axum)                      │
//! │                   GET/POST/PUT/DELETE /db                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Engine                               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                ┌──────▼──────┐        ┌──────────────────┐
//!                │    Store    │◄───────│ Autosave thread  │
//!                │  (RwLock)   │        │ Shutdown (final) │
//!                └──────┬──────┘        └────────┬─────────┘
//!                       │ point-in-time copy      │
//!                       ▼                         ▼
//!                ┌─────────────────────────────────────┐
//!                │          Snapshot Manager           │
//!                │  db.json + db_backup_<unix>.json    │
//!                └─────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entry;
pub mod store;
pub mod storage;
pub mod autosave;
pub mod shutdown;
pub mod protocol;
pub mod network;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SnapError, Result};
pub use config::Config;
pub use engine::Engine;
pub use entry::{generate_id, Entry, EntryId};
pub use store::{Snapshot, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SnapKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
