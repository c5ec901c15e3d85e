//! Tests for JsonFileStorage
//!
//! These tests verify:
//! - Missing files load as an empty collection
//! - Malformed files are reported and backed up, never silently dropped
//! - Save/load round-trips keep records and their order
//! - Both write modes replace the whole document

use std::fs;
use std::path::PathBuf;

use roster::config::WriteMode;
use roster::record::{RecordCollection, StudentRecord};
use roster::storage::{JsonFileStorage, LoadOutcome};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.json");
    (temp_dir, path)
}

fn sample_collection() -> RecordCollection {
    vec![
        ("S2", StudentRecord::new("Bea", 22, "B")),
        ("S1", StudentRecord::new("Ana", 20, "A")),
        ("S10", StudentRecord::new("Cai", 19, "C+")),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file() {
    let (_temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    let outcome = storage.load().unwrap();

    assert_eq!(outcome, LoadOutcome::Missing);
    assert!(outcome.into_collection().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_load_existing_document() {
    let (_temp, path) = setup_temp_file();
    fs::write(
        &path,
        r#"{"S1": {"name": "Ana", "age": 20, "grade": "A"}, "S0": {"name": "Zed", "age": 30, "grade": "F"}}"#,
    )
    .unwrap();

    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);
    let collection = storage.load().unwrap().into_collection();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.get("S1"), Some(&StudentRecord::new("Ana", 20, "A")));
    // Document order, not sorted order
    assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["S1", "S0"]);
}

#[test]
fn test_load_malformed_file_is_backed_up() {
    let (temp, path) = setup_temp_file();
    fs::write(&path, "{ this is not json").unwrap();

    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);
    let outcome = storage.load().unwrap();

    match &outcome {
        LoadOutcome::Corrupt { reason, backup } => {
            assert!(!reason.is_empty());
            let backup = backup.as_ref().unwrap();
            assert_eq!(backup, &temp.path().join("students.json.corrupt"));
            assert_eq!(fs::read_to_string(backup).unwrap(), "{ this is not json");
        }
        other => panic!("expected Corrupt, got {:?}", other),
    }
    assert!(outcome.into_collection().is_empty());

    // The original file is untouched by loading
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
}

/// `/proc/version` is readable text, but nothing can be created next to it
#[cfg(target_os = "linux")]
#[test]
fn test_load_malformed_file_without_room_for_backup() {
    let path = PathBuf::from("/proc/version");
    if !path.exists() {
        return;
    }
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    let outcome = storage.load().unwrap();

    match outcome {
        LoadOutcome::Corrupt { reason, backup } => {
            assert!(!reason.is_empty());
            assert_eq!(backup, None);
        }
        other => panic!("expected Corrupt, got {:?}", other),
    }
}

#[test]
fn test_load_wrong_shape_is_corrupt() {
    let (_temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    for body in [
        "[]",
        r#"{"S1": {"name": "Ana", "age": "twenty", "grade": "A"}}"#,
        r#"{"S1": {"name": "Ana", "grade": "A"}}"#,
        r#"{"S1": {"name": "Ana", "age": 20, "grade": "A", "extra": 1}}"#,
        r#"{"S1": {"name": "Ana", "age": 99999999999999999999, "grade": "A"}}"#,
    ] {
        fs::write(&path, body).unwrap();
        assert!(storage.load().unwrap().is_corrupt(), "body {:?}", body);
    }
}

#[test]
fn test_load_empty_file_is_corrupt() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "").unwrap();

    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    assert!(storage.load().unwrap().is_corrupt());
}

#[test]
fn test_repeated_corruption_keeps_every_backup() {
    let (temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    fs::write(&path, "first").unwrap();
    storage.load().unwrap();
    fs::write(&path, "second").unwrap();
    storage.load().unwrap();

    let first = temp.path().join("students.json.corrupt");
    let second = temp.path().join("students.json.corrupt.1");
    assert_eq!(fs::read_to_string(first).unwrap(), "first");
    assert_eq!(fs::read_to_string(second).unwrap(), "second");
}

#[test]
fn test_load_duplicate_key_keeps_last_value_first_position() {
    let (_temp, path) = setup_temp_file();
    fs::write(
        &path,
        r#"{
            "S1": {"name": "Old", "age": 1, "grade": "A"},
            "S2": {"name": "Bea", "age": 22, "grade": "B"},
            "S1": {"name": "New", "age": 2, "grade": "A"}
        }"#,
    )
    .unwrap();

    let collection = JsonFileStorage::new(&path, WriteMode::Atomic)
        .load()
        .unwrap()
        .into_collection();

    assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["S1", "S2"]);
    assert_eq!(collection.get("S1").unwrap().name, "New");
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_then_load_round_trip() {
    let (_temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);
    let collection = sample_collection();

    storage.save(&collection).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded, LoadOutcome::Loaded(collection));
}

#[test]
fn test_save_writes_readable_json() {
    let (_temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    storage.save(&sample_collection()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"S2\": {\n        \"name\": \"Bea\","));
    assert!(text.ends_with("}\n"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["S1"]["age"], 20);
    assert_eq!(value["S10"]["grade"], "C+");
}

#[test]
fn test_save_empty_collection() {
    let (_temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    storage.save(&RecordCollection::new()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    assert_eq!(storage.load().unwrap(), LoadOutcome::Loaded(RecordCollection::new()));
}

#[test]
fn test_save_overwrites_whole_file() {
    let (_temp, path) = setup_temp_file();

    for mode in [WriteMode::Atomic, WriteMode::InPlace] {
        let storage = JsonFileStorage::new(&path, mode);
        storage.save(&sample_collection()).unwrap();

        let smaller: RecordCollection = vec![("S9", StudentRecord::new("Ida", 18, "A"))]
            .into_iter()
            .collect();
        storage.save(&smaller).unwrap();

        assert_eq!(storage.load().unwrap(), LoadOutcome::Loaded(smaller), "mode {:?}", mode);
    }
}

#[test]
fn test_atomic_save_leaves_no_temp_files() {
    let (temp, path) = setup_temp_file();
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    storage.save(&sample_collection()).unwrap();
    storage.save(&sample_collection()).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["students.json".to_string()]);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("students.json");
    let storage = JsonFileStorage::new(&path, WriteMode::Atomic);

    storage.save(&sample_collection()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_save_into_unwritable_location_fails() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();

    let storage = JsonFileStorage::new(blocker.join("students.json"), WriteMode::Atomic);

    let err = storage.save(&sample_collection()).unwrap_err();
    assert!(err.is_storage());
}
