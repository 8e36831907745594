//! Command Surface Integration Tests
//!
//! Tests that drive `AppState` through the command functions, the way the
//! presentation layer does.

use std::sync::Arc;

use beach_atlas::commands::{
    add_memory, get_beach, get_health, get_itinerary, get_settings, list_beaches, list_memories,
    search_beaches, toggle_itinerary, update_settings,
};
use beach_atlas::models::settings::SettingsUpdate;
use beach_atlas::services::FileDatasetSource;
use beach_atlas::services::image_codec::embedded_dimensions;
use beach_atlas::storage::{ConfigService, Database};
use beach_atlas::AppState;
use tempfile::TempDir;

use crate::common::{kerala_beaches, png_bytes, write_dataset};

// ============================================================================
// Helper Functions
// ============================================================================

/// Initialize a state backed by files under `dir`
async fn init_state(dir: &TempDir) -> AppState {
    let dataset = dir.path().join("beaches.json");
    if !dataset.exists() {
        write_dataset(&dataset, &kerala_beaches());
    }
    let config = ConfigService::open(dir.path().join("config.json")).unwrap();
    let db = Database::open(dir.path().join("local-storage.db"), Some(5 * 1024 * 1024)).unwrap();

    let state = AppState::new();
    state
        .initialize_with(config, Arc::new(db), &FileDatasetSource::new(&dataset))
        .await
        .unwrap();
    state
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_list_and_get_beaches() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let listed = list_beaches(&state).await;
    assert!(listed.success);
    assert_eq!(listed.data.unwrap().len(), 3);

    let found = get_beach(&state, "Marari Beach".to_string()).await;
    assert_eq!(found.data.unwrap().name, "Marari Beach");

    let missing = get_beach(&state, "Atlantis".to_string()).await;
    assert!(!missing.success);
    assert_eq!(missing.error_code.as_deref(), Some("not_found"));
}

#[tokio::test]
async fn test_search_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let response = search_beaches(&state, String::new(), Some("stormy".to_string())).await;
    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("validation_failure"));

    let serene = search_beaches(&state, String::new(), Some("serene".to_string())).await;
    assert_eq!(serene.data.unwrap().len(), 1);
}

// ============================================================================
// Memories
// ============================================================================

#[tokio::test]
async fn test_add_memory_then_restart() {
    let dir = TempDir::new().unwrap();

    {
        let state = init_state(&dir).await;
        let response = add_memory(
            &state,
            "Varkala Beach".to_string(),
            Some(png_bytes(1600, 1200)),
            Some("<script>alert(1)</script>".to_string()),
        )
        .await;
        assert!(response.success, "{:?}", response.error);
        let memory = response.data.unwrap();
        assert_eq!(memory.note, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(embedded_dimensions(&memory.photo).unwrap(), (800, 600));
    }

    let state = init_state(&dir).await;
    let memories = list_memories(&state, "Varkala Beach".to_string()).await.data.unwrap();
    assert_eq!(memories.len(), 1);
    assert!(memories[0].photo.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_add_memory_missing_fields() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let response = add_memory(&state, "Kovalam Beach".to_string(), None, None).await;
    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("validation_failure"));
    assert!(response.error.unwrap().contains("photo"));

    let memories = list_memories(&state, "Kovalam Beach".to_string()).await.data.unwrap();
    assert!(memories.is_empty());
}

#[tokio::test]
async fn test_add_memory_decode_error() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let response = add_memory(
        &state,
        "Kovalam Beach".to_string(),
        Some(b"not an image at all".to_vec()),
        Some("note".to_string()),
    )
    .await;
    assert_eq!(response.error_code.as_deref(), Some("decode_error"));
}

#[tokio::test]
async fn test_image_settings_apply_to_later_memories() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let updated = update_settings(
        &state,
        SettingsUpdate {
            max_image_dimension: Some(200),
            ..Default::default()
        },
    )
    .await;
    assert!(updated.success);
    assert_eq!(get_settings(&state).await.data.unwrap().max_image_dimension, 200);

    let memory = add_memory(
        &state,
        "Marari Beach".to_string(),
        Some(png_bytes(1000, 500)),
        Some("smaller".to_string()),
    )
    .await
    .data
    .unwrap();
    assert_eq!(embedded_dimensions(&memory.photo).unwrap(), (200, 100));

    let rejected = update_settings(
        &state,
        SettingsUpdate {
            image_quality: Some(3.0),
            ..Default::default()
        },
    )
    .await;
    assert!(!rejected.success);
    assert_eq!(get_settings(&state).await.data.unwrap().max_image_dimension, 200);
}

// ============================================================================
// Itinerary
// ============================================================================

#[tokio::test]
async fn test_toggle_itinerary_and_restart() {
    let dir = TempDir::new().unwrap();

    {
        let state = init_state(&dir).await;
        let names = toggle_itinerary(&state, "Varkala Beach".to_string()).await.data.unwrap();
        assert_eq!(names, vec!["Varkala Beach"]);
        toggle_itinerary(&state, "Kovalam Beach".to_string()).await;
        toggle_itinerary(&state, "Varkala Beach".to_string()).await;
    }

    let state = init_state(&dir).await;
    let beaches = get_itinerary(&state).await.data.unwrap();
    let names: Vec<&str> = beaches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Kovalam Beach"]);
}

#[tokio::test]
async fn test_toggle_unknown_beach() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;

    let response = toggle_itinerary(&state, "Atlantis".to_string()).await;
    assert_eq!(response.error_code.as_deref(), Some("not_found"));
    assert!(get_itinerary(&state).await.data.unwrap().is_empty());
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_after_init() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir).await;
    toggle_itinerary(&state, "Kovalam Beach".to_string()).await;

    let health = get_health(&state).await.data.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.storage && health.config && health.catalog_loaded);
    assert!(health.storage_used_bytes > 0);
    assert_eq!(health.storage_quota_bytes, Some(5 * 1024 * 1024));
}
