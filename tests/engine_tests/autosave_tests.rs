//! Tests for the Autosave Scheduler
//!
//! These tests verify:
//! - Ticks write snapshots on the configured interval
//! - A failed tick does not stop later ticks
//! - Stopping the handle ends the thread

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;
use snapkv::autosave;
use snapkv::storage::SnapshotManager;
use snapkv::Store;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Poll until `check` passes or the deadline expires
fn wait_for(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    check()
}

// =============================================================================
// Tick Tests
// =============================================================================

#[test]
fn test_autosave_writes_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(SnapshotManager::open(temp_dir.path()).unwrap());
    let store = Arc::new(Store::new());
    let entry = store.create(json!("autosaved"));

    let handle = autosave::spawn(
        Arc::clone(&store),
        Arc::clone(&storage),
        Duration::from_millis(20),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(5), || handle.ticks() >= 1));
    assert!(wait_for(Duration::from_secs(5), || storage.load().len() == 1));
    handle.stop();

    assert_eq!(storage.load().get(&entry.id), Some(&json!("autosaved")));
}

#[test]
fn test_autosave_picks_up_later_writes() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(SnapshotManager::open(temp_dir.path()).unwrap());
    let store = Arc::new(Store::new());

    let handle = autosave::spawn(
        Arc::clone(&store),
        Arc::clone(&storage),
        Duration::from_millis(20),
    )
    .unwrap();

    for i in 0..3 {
        store.create(json!(i));
    }

    assert!(wait_for(Duration::from_secs(5), || storage.load().len() == 3));

    // Every tick after the first rotates the previous snapshot
    assert!(wait_for(Duration::from_secs(5), || !storage
        .backups()
        .unwrap()
        .is_empty()));
    handle.stop();

    assert_eq!(storage.load().len(), 3);
}

#[test]
fn test_autosave_continues_after_failure() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("db");
    let storage = Arc::new(SnapshotManager::open(&data_dir).unwrap());
    let store = Arc::new(Store::new());
    store.create(json!("survivor"));

    // A plain file where the directory should be makes every save fail
    fs::remove_dir_all(&data_dir).unwrap();
    fs::write(&data_dir, "blocking file").unwrap();

    let handle = autosave::spawn(
        Arc::clone(&store),
        Arc::clone(&storage),
        Duration::from_millis(20),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(5), || handle.failures() >= 2));

    // Clear the obstruction; the next tick recreates the directory
    fs::remove_file(&data_dir).unwrap();

    assert!(wait_for(Duration::from_secs(5), || storage
        .primary_path()
        .exists()));
    assert!(handle.ticks() > handle.failures());
    handle.stop();

    assert_eq!(storage.load().len(), 1);
}

#[test]
fn test_autosave_stop_is_prompt() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(SnapshotManager::open(temp_dir.path()).unwrap());
    let store = Arc::new(Store::new());

    let handle = autosave::spawn(store, Arc::clone(&storage), Duration::from_secs(3600)).unwrap();
    assert_eq!(handle.interval(), Duration::from_secs(3600));

    let started = Instant::now();
    handle.stop();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!storage.primary_path().exists());
}

#[test]
fn test_autosave_stops_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(SnapshotManager::open(temp_dir.path()).unwrap());
    let store = Arc::new(Store::new());

    {
        let _handle =
            autosave::spawn(Arc::clone(&store), Arc::clone(&storage), Duration::from_millis(10))
                .unwrap();
        thread::sleep(Duration::from_millis(50));
    }

    // No more ticks once the handle is gone
    let files_before = fs::read_dir(temp_dir.path()).unwrap().count();
    thread::sleep(Duration::from_millis(100));
    let files_after = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(files_before, files_after);
}
