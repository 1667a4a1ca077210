//! Snapshot Manager
//!
//! Owns the data directory and every file in it.
//!
//! ## Responsibilities
//! - Load the primary snapshot on startup
//! - Rotate the primary into a timestamped backup before each save
//! - Write new snapshots atomically
//! - Enumerate backups

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::error::Result;
use crate::store::{Snapshot, Store};

use super::{decode_snapshot, encode_snapshot};

/// Outcome of a successful save
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// Number of entries written
    pub entries: usize,

    /// Size of the new primary file in bytes
    pub bytes_written: usize,

    /// Where the previous primary was moved, if there was one
    pub backup: Option<PathBuf>,
}

/// Manages the snapshot directory
///
/// ## Concurrency:
/// - `save_lock`: serializes saves so two rotations never interleave
/// - The store lock is only held while `save` copies the mapping
/// - All methods use `&self`
pub struct SnapshotManager {
    /// Directory holding the primary snapshot and backups
    data_dir: PathBuf,

    /// Path of the primary snapshot
    primary_path: PathBuf,

    /// Serializes rotate + write
    save_lock: Mutex<()>,
}

impl SnapshotManager {
    // =========================================================================
    // File Name Constants
    // =========================================================================
    const PRIMARY_FILENAME: &'static str = "db.json";
    const TEMP_FILENAME: &'static str = "db.json.tmp";
    const BACKUP_PREFIX: &'static str = "db_backup_";
    const BACKUP_EXTENSION: &'static str = "json";

    /// Open the snapshot directory, creating it if needed
    ///
    /// Failing to create the directory is the one storage error that stops
    /// startup.
    pub fn open(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;

        Ok(Self {
            data_dir: path.to_path_buf(),
            primary_path: path.join(Self::PRIMARY_FILENAME),
            save_lock: Mutex::new(()),
        })
    }

    /// Load the latest snapshot
    ///
    /// Never fails: a missing, unreadable, or corrupt primary file yields an
    /// empty snapshot. Corrupt files are left in place and become the backup
    /// of the next save.
    pub fn load(&self) -> Snapshot {
        if let Err(e) = fs::create_dir_all(&self.data_dir) {
            tracing::warn!(
                dir = %self.data_dir.display(),
                error = %e,
                "Cannot create data directory, starting with an empty store"
            );
            return Snapshot::new();
        }

        let bytes = match fs::read(&self.primary_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.primary_path.display(), "No snapshot found");
                return Snapshot::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.primary_path.display(),
                    error = %e,
                    "Cannot read snapshot, starting with an empty store"
                );
                return Snapshot::new();
            }
        };

        match decode_snapshot(&bytes) {
            Ok(decoded) => {
                if !decoded.skipped_keys.is_empty() {
                    tracing::warn!(
                        skipped = decoded.skipped_keys.len(),
                        "Dropped snapshot keys that are not valid entry ids"
                    );
                }
                if !decoded.duplicate_keys.is_empty() {
                    tracing::warn!(
                        duplicates = decoded.duplicate_keys.len(),
                        keys = ?decoded.duplicate_keys,
                        "Snapshot keys collapsed onto an id already loaded"
                    );
                }
                tracing::info!(
                    entries = decoded.entries.len(),
                    path = %self.primary_path.display(),
                    "Snapshot loaded"
                );
                decoded.entries
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.primary_path.display(),
                    error = %e,
                    "Discarding corrupt snapshot, starting with an empty store"
                );
                Snapshot::new()
            }
        }
    }

    /// Persist the store's current state
    ///
    /// The store is copied under its lock, then the lock is released before
    /// any disk I/O happens.
    pub fn save(&self, store: &Store) -> Result<SaveReport> {
        let _save_guard = self.save_lock.lock();
        let snapshot = store.list_all();
        self.write_locked(&snapshot)
    }

    /// List backup files, oldest first
    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        let mut backups: Vec<((u64, u32), PathBuf)> = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stamp) = Self::parse_backup_stamp(&path) {
                backups.push((stamp, path));
            }
        }

        backups.sort_by_key(|(stamp, _)| *stamp);
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the primary snapshot path
    pub fn primary_path(&self) -> &Path {
        &self.primary_path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Rotate and write (called with `save_lock` held)
    fn write_locked(&self, snapshot: &Snapshot) -> Result<SaveReport> {
        // Encode first so a serialization failure leaves the disk untouched
        let bytes = encode_snapshot(snapshot)?;

        fs::create_dir_all(&self.data_dir)?;

        // Step 1: Move the current primary aside (must happen before the write)
        let backup = if self.primary_path.is_file() {
            let backup_path = self.next_backup_path(unix_now());
            fs::rename(&self.primary_path, &backup_path)?;
            tracing::debug!(backup = %backup_path.display(), "Rotated previous snapshot");
            Some(backup_path)
        } else {
            None
        };

        // Step 2: Write to a temp file and rename over the primary
        let temp_path = self.data_dir.join(Self::TEMP_FILENAME);
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.primary_path)?;

        tracing::debug!(
            entries = snapshot.len(),
            bytes = bytes.len(),
            path = %self.primary_path.display(),
            "Snapshot written"
        );

        Ok(SaveReport {
            entries: snapshot.len(),
            bytes_written: bytes.len(),
            backup,
        })
    }

    /// First free backup path for the given second
    ///
    /// "db_backup_1700000000.json", then "db_backup_1700000000_1.json", ...
    fn next_backup_path(&self, timestamp: u64) -> PathBuf {
        let base = self.backup_path(timestamp, 0);
        if !base.exists() {
            return base;
        }

        let mut seq = 1;
        loop {
            let candidate = self.backup_path(timestamp, seq);
            if !candidate.exists() {
                return candidate;
            }
            seq += 1;
        }
    }

    fn backup_path(&self, timestamp: u64, seq: u32) -> PathBuf {
        let name = if seq == 0 {
            format!("{}{}.{}", Self::BACKUP_PREFIX, timestamp, Self::BACKUP_EXTENSION)
        } else {
            format!(
                "{}{}_{}.{}",
                Self::BACKUP_PREFIX,
                timestamp,
                seq,
                Self::BACKUP_EXTENSION
            )
        };
        self.data_dir.join(name)
    }

    /// Parse (timestamp, sequence) from a backup filename
    /// "db_backup_1700000000.json"   → Some((1700000000, 0))
    /// "db_backup_1700000000_2.json" → Some((1700000000, 2))
    fn parse_backup_stamp(path: &Path) -> Option<(u64, u32)> {
        if path.extension()? != Self::BACKUP_EXTENSION {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let stamp = stem.strip_prefix(Self::BACKUP_PREFIX)?;

        match stamp.split_once('_') {
            Some((ts, seq)) => Some((ts.parse().ok()?, seq.parse().ok()?)),
            None => Some((stamp.parse().ok()?, 0)),
        }
    }
}

/// Current Unix time in whole seconds
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
