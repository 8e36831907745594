//! Catalog Integration Tests
//!
//! Tests for loading the dataset from disk and searching it.

use std::sync::Arc;

use beach_atlas::models::beach::BeachCategory;
use beach_atlas::services::{dataset_source_for, Catalog, ImageCodec, MemoryStore};
use beach_atlas::utils::error::AppError;
use beach_atlas_core::{InMemoryStore, KeyValueStore};
use tempfile::TempDir;

use crate::common::{kerala_beaches, write_dataset};

fn memory_store(backend: Arc<InMemoryStore>) -> MemoryStore {
    MemoryStore::new(backend, ImageCodec::default())
}

#[tokio::test]
async fn test_load_dataset_file_with_memories() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("beaches.json");
    write_dataset(&dataset, &kerala_beaches());

    let backend = Arc::new(InMemoryStore::new());
    backend
        .set_item(
            "Varkala Beach",
            r#"[{"photo":"data:image/jpeg;base64,AA","note":"cliff walk"}]"#,
        )
        .unwrap();

    let source = dataset_source_for(dataset.to_str().unwrap());
    let catalog = Catalog::initialize(source.as_ref(), &memory_store(backend))
        .await
        .unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get("Varkala Beach").unwrap().memories.len(), 1);
    assert_eq!(catalog.get("Kovalam Beach").unwrap().star_rating(), "★★★★☆");
}

#[tokio::test]
async fn test_dataset_with_camel_case_fields() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("beaches.json");
    std::fs::write(
        &dataset,
        r#"[{"name":"Cherai Beach","lat":10.14,"lng":76.18,"type":"serene",
            "description":"Backwaters meet the sea","features":["Dolphins"],
            "rating":4.2,"reviews":150,"bestTime":"Nov - Feb",
            "activities":["Swimming"]}]"#,
    )
    .unwrap();

    let source = dataset_source_for(dataset.to_str().unwrap());
    let catalog = Catalog::initialize(source.as_ref(), &memory_store(Arc::new(InMemoryStore::new())))
        .await
        .unwrap();

    let cherai = catalog.get("Cherai Beach").unwrap();
    assert_eq!(cherai.category, BeachCategory::Serene);
    assert_eq!(cherai.best_time.as_deref(), Some("Nov - Feb"));
    assert!(cherai.memories.is_empty());
}

#[tokio::test]
async fn test_record_without_description_loads() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("beaches.json");
    std::fs::write(
        &dataset,
        r#"[{"name":"Bekal Beach","lat":12.39,"lng":75.03,"type":"popular","rating":9e300},
            {"name":"Payyambalam Beach","lat":11.88,"lng":75.36,"type":"serene",
             "description":"Long sandy stretch"}]"#,
    )
    .unwrap();

    let source = dataset_source_for(dataset.to_str().unwrap());
    let catalog = Catalog::initialize(source.as_ref(), &memory_store(Arc::new(InMemoryStore::new())))
        .await
        .unwrap();

    let bekal = catalog.get("Bekal Beach").unwrap();
    assert_eq!(bekal.description, "");
    assert_eq!(bekal.star_rating(), "★★★★★");
    assert_eq!(catalog.len(), 2);
}

#[tokio::test]
async fn test_malformed_dataset_is_load_failure() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("beaches.json");
    std::fs::write(&dataset, r#"[{"name":"Nameless"}]"#).unwrap();

    let source = dataset_source_for(dataset.to_str().unwrap());
    let result =
        Catalog::initialize(source.as_ref(), &memory_store(Arc::new(InMemoryStore::new()))).await;
    assert!(matches!(result, Err(AppError::LoadFailure(_))));
}

#[test]
fn test_search_combines_text_and_category() {
    let catalog = Catalog::from_beaches(kerala_beaches());

    let adventurous: Vec<&str> = catalog
        .search("para", Some(BeachCategory::Adventure))
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(adventurous, vec!["Varkala Beach"]);

    assert!(catalog.search("para", Some(BeachCategory::Serene)).is_empty());
    assert_eq!(catalog.search("BEACH", None).len(), 3);
}
