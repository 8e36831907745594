//! Memory Pipeline Integration Tests
//!
//! Tests for adding photo memories through the SQLite-backed store and
//! reading them back after a restart.

use std::sync::Arc;

use beach_atlas::models::beach::{Beach, BeachCategory};
use beach_atlas::services::image_codec::embedded_dimensions;
use beach_atlas::services::{ImageCodec, MemoryStore};
use beach_atlas::storage::Database;
use beach_atlas::utils::error::AppError;
use beach_atlas_core::KeyValueStore;
use tempfile::TempDir;

use crate::common::png_bytes;

fn kovalam() -> Beach {
    Beach::new("Kovalam Beach", 8.4004, 76.9787, BeachCategory::Popular)
}

// ============================================================================
// Round Trip
// ============================================================================

#[tokio::test]
async fn test_memories_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("local-storage.db");

    let added = {
        let db = Arc::new(Database::open(&db_path, None).unwrap());
        let store = MemoryStore::new(db, ImageCodec::default());
        let mut beach = kovalam();
        let first = store
            .add_memory(&mut beach, Some(png_bytes(4000, 2000)), Some("Sunset & surf"))
            .await
            .unwrap();
        let second = store
            .add_memory(&mut beach, Some(png_bytes(300, 200)), Some("Lighthouse climb"))
            .await
            .unwrap();
        vec![first, second]
    };

    let db = Arc::new(Database::open(&db_path, None).unwrap());
    let store = MemoryStore::new(db, ImageCodec::default());
    let mut beaches = vec![kovalam()];
    store.load_all(&mut beaches);

    assert_eq!(beaches[0].memories, added);
    assert_eq!(beaches[0].memories[0].note, "Sunset &amp; surf");
    assert_eq!(embedded_dimensions(&beaches[0].memories[0].photo).unwrap(), (800, 400));
    assert_eq!(embedded_dimensions(&beaches[0].memories[1].photo).unwrap(), (300, 200));
}

#[tokio::test]
async fn test_loading_twice_is_idempotent() {
    let db = Arc::new(Database::new_in_memory(None).unwrap());
    let store = MemoryStore::new(db, ImageCodec::default());
    let mut beach = kovalam();
    store
        .add_memory(&mut beach, Some(png_bytes(64, 64)), Some("calm"))
        .await
        .unwrap();

    let mut beaches = vec![kovalam()];
    store.load_all(&mut beaches);
    let first = beaches[0].memories.clone();
    store.load_all(&mut beaches);

    assert_eq!(beaches[0].memories, first);
    assert_eq!(first.len(), 1);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[tokio::test]
async fn test_quota_rejection_keeps_memory_and_storage_in_sync() {
    let db = Arc::new(Database::new_in_memory(Some(4 * 1024)).unwrap());
    let store = MemoryStore::new(db.clone(), ImageCodec::new(16, 0.7));
    let mut beach = kovalam();

    // Small photos fit until the quota runs out
    let mut accepted = 0;
    let mut rejected = false;
    for i in 0..100 {
        match store
            .add_memory(&mut beach, Some(png_bytes(16, 16)), Some(&format!("visit {}", i)))
            .await
        {
            Ok(_) => accepted += 1,
            Err(AppError::Persistence(core)) => {
                assert!(core.is_quota_exceeded());
                rejected = true;
                break;
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert!(rejected);
    assert!(accepted > 0);
    assert_eq!(beach.memories.len(), accepted);
    assert_eq!(store.stored_memories("Kovalam Beach"), beach.memories);
    assert!(db.usage_bytes().unwrap() <= 4 * 1024);
}

#[tokio::test]
async fn test_corrupt_entry_only_affects_its_beach() {
    let db = Arc::new(Database::new_in_memory(None).unwrap());
    db.set_item("Kovalam Beach", "{broken").unwrap();
    db.set_item(
        "Marari Beach",
        r#"[{"photo":"data:image/jpeg;base64,AA","note":"backwaters"}]"#,
    )
    .unwrap();
    let store = MemoryStore::new(db, ImageCodec::default());

    let mut beaches = vec![
        kovalam(),
        Beach::new("Marari Beach", 9.6, 76.3, BeachCategory::Serene),
    ];
    store.load_all(&mut beaches);

    assert!(beaches[0].memories.is_empty());
    assert_eq!(beaches[1].memories.len(), 1);
}

#[tokio::test]
async fn test_invalid_inputs_leave_storage_untouched() {
    let db = Arc::new(Database::new_in_memory(None).unwrap());
    let store = MemoryStore::new(db.clone(), ImageCodec::default());
    let mut beach = kovalam();

    let missing = store.add_memory(&mut beach, Some(png_bytes(8, 8)), Some("  ")).await;
    assert!(matches!(missing, Err(AppError::MissingFields(ref f)) if f == &["note"]));

    let undecodable = store
        .add_memory(&mut beach, Some(b"plain text".to_vec()), Some("note"))
        .await;
    assert!(matches!(undecodable, Err(AppError::Decode(_))));

    assert!(beach.memories.is_empty());
    assert_eq!(db.get_item("Kovalam Beach").unwrap(), None);
}
