//! Tests for Engine
//!
//! These tests verify:
//! - Opening creates the data directory and loads the latest snapshot
//! - Command execution maps store outcomes to responses
//! - Restart recovery from a saved snapshot
//! - Invalid configuration is rejected

use std::fs;
use std::time::Duration;

use serde_json::json;
use snapkv::config::Config;
use snapkv::engine::Engine;
use snapkv::entry::generate_id;
use snapkv::protocol::{Command, Response, Status};
use snapkv::SnapError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::open_path(temp_dir.path()).unwrap();
    (temp_dir, engine)
}

fn created_id(response: Response) -> snapkv::EntryId {
    match response {
        Response::Entry(entry) => entry.id,
        other => panic!("Expected Entry response, got {:?}", other),
    }
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_engine_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("database");

    let engine = Engine::open_path(&data_dir).unwrap();

    assert!(data_dir.is_dir());
    assert_eq!(engine.data_dir(), data_dir.as_path());
    assert!(engine.store().is_empty());
}

#[test]
fn test_engine_open_rejects_zero_interval() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .autosave_interval(Duration::ZERO)
        .build();

    let result = Engine::open(config);

    assert!(matches!(result, Err(SnapError::Config(_))));
}

#[test]
fn test_engine_open_with_corrupt_snapshot_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("db.json"), "not json at all").unwrap();

    let engine = Engine::open_path(temp_dir.path()).unwrap();

    assert!(engine.store().is_empty());
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_create_get() {
    let (_temp, engine) = setup_temp_engine();

    let id = created_id(engine.execute(Command::Create { data: json!("hi") }));

    match engine.execute(Command::Get { id }) {
        Response::Entry(entry) => {
            assert_eq!(entry.id, id);
            assert_eq!(entry.data, json!("hi"));
        }
        other => panic!("Expected Entry response, got {:?}", other),
    }
}

#[test]
fn test_execute_update() {
    let (_temp, engine) = setup_temp_engine();
    let id = created_id(engine.execute(Command::Create { data: json!("hi") }));

    let response = engine.execute(Command::Update {
        id,
        data: json!("bye"),
    });

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(engine.store().get(&id), Some(json!("bye")));
}

#[test]
fn test_execute_delete() {
    let (_temp, engine) = setup_temp_engine();
    let id = created_id(engine.execute(Command::Create { data: json!(1) }));

    assert_eq!(engine.execute(Command::Delete { id }), Response::Deleted);
    assert_eq!(engine.execute(Command::Delete { id }), Response::NotFound);
    assert_eq!(engine.execute(Command::Get { id }), Response::NotFound);
}

#[test]
fn test_execute_unknown_id() {
    let (_temp, engine) = setup_temp_engine();
    let id = generate_id();

    assert_eq!(engine.execute(Command::Get { id }), Response::NotFound);
    assert_eq!(
        engine.execute(Command::Update { id, data: json!(1) }),
        Response::NotFound
    );
    assert_eq!(engine.execute(Command::Delete { id }), Response::NotFound);
}

#[test]
fn test_execute_list() {
    let (_temp, engine) = setup_temp_engine();
    let a = created_id(engine.execute(Command::Create { data: json!("a") }));
    let b = created_id(engine.execute(Command::Create { data: json!("b") }));

    match engine.execute(Command::List) {
        Response::Mapping(mapping) => {
            assert_eq!(mapping.len(), 2);
            assert_eq!(mapping.get(&a), Some(&json!("a")));
            assert_eq!(mapping.get(&b), Some(&json!("b")));
        }
        other => panic!("Expected Mapping response, got {:?}", other),
    }
}

// =============================================================================
// Recovery Tests
// =============================================================================

#[test]
fn test_engine_restart_recovers_saved_state() {
    let temp_dir = TempDir::new().unwrap();

    let (kept, removed) = {
        let engine = Engine::open_path(temp_dir.path()).unwrap();
        let kept = engine.store().create(json!({"keep": true}));
        let removed = engine.store().create(json!("temp"));
        engine.store().delete(&removed.id).unwrap();
        engine.save().unwrap();
        (kept, removed)
    };

    let engine = Engine::open_path(temp_dir.path()).unwrap();

    assert_eq!(engine.store().len(), 1);
    assert_eq!(engine.store().get(&kept.id), Some(json!({"keep": true})));
    assert_eq!(engine.store().get(&removed.id), None);
}

#[test]
fn test_engine_unsaved_writes_are_lost() {
    let temp_dir = TempDir::new().unwrap();

    {
        let engine = Engine::open_path(temp_dir.path()).unwrap();
        engine.store().create(json!("saved"));
        engine.save().unwrap();
        engine.store().create(json!("never saved"));
    }

    let engine = Engine::open_path(temp_dir.path()).unwrap();
    assert_eq!(engine.store().len(), 1);
}

#[test]
fn test_engine_clones_share_store() {
    let (_temp, engine) = setup_temp_engine();
    let clone = engine.clone();

    let entry = engine.store().create(json!(7));

    assert_eq!(clone.store().get(&entry.id), Some(json!(7)));
}
