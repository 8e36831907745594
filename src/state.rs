//! Application State
//!
//! The single state object the presentation layer talks to. It owns the
//! catalog, the memory and itinerary stores, the storage backend and the
//! configuration; nothing lives in module-level globals.

use std::sync::Arc;

use beach_atlas_core::KeyValueStore;
use tokio::sync::RwLock;

use crate::models::beach::{Beach, BeachCategory, Memory};
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::catalog::{dataset_source_for, Catalog, DatasetSource};
use crate::services::image_codec::ImageCodec;
use crate::services::itinerary::ItineraryStore;
use crate::services::memories::MemoryStore;
use crate::storage::{ConfigService, Database};
use crate::utils::error::{AppError, AppResult};

/// Application state shared with the presentation layer
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Local key-value store all persistent state is written to
    backend: Arc<RwLock<Option<Arc<dyn KeyValueStore>>>>,
    /// Memory store for per-beach photo+note records
    memory_store: Arc<RwLock<Option<MemoryStore>>>,
    /// Itinerary selection set
    itinerary: Arc<RwLock<Option<ItineraryStore>>>,
    /// Loaded beaches; empty until the dataset loads
    catalog: Arc<RwLock<Catalog>>,
    /// Message of the last dataset load failure, if any
    load_failure: Arc<RwLock<Option<String>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            backend: Arc::new(RwLock::new(None)),
            memory_store: Arc::new(RwLock::new(None)),
            itinerary: Arc::new(RwLock::new(None)),
            catalog: Arc::new(RwLock::new(Catalog::default())),
            load_failure: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services from the default config and storage locations
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }

        let config = ConfigService::new()?;
        let app_config = config.get_config_clone();
        let backend = Database::new(Some(app_config.storage_quota_bytes))?;
        let source = dataset_source_for(&app_config.dataset_source);

        self.initialize_with(config, Arc::new(backend), source.as_ref())
            .await
    }

    /// Initialize with explicit collaborators.
    ///
    /// The itinerary is loaded first so it is available even when the
    /// dataset fails. On `LoadFailure` the catalog stays empty, the failure
    /// is recorded, and the state remains uninitialized so a later call can
    /// try again.
    pub async fn initialize_with(
        &self,
        config: ConfigService,
        backend: Arc<dyn KeyValueStore>,
        source: &dyn DatasetSource,
    ) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let app_config = config.get_config_clone();
        let memory_store = MemoryStore::new(backend.clone(), ImageCodec::from_config(&app_config));
        let mut itinerary = ItineraryStore::new(backend.clone(), app_config.itinerary_key.clone());
        itinerary.load();

        *self.config.write().await = Some(config);
        *self.backend.write().await = Some(backend);
        *self.itinerary.write().await = Some(itinerary);

        let loaded = Catalog::initialize(source, &memory_store).await;
        *self.memory_store.write().await = Some(memory_store);

        match loaded {
            Ok(catalog) => {
                if catalog.get(&app_config.itinerary_key).is_some() {
                    tracing::warn!(
                        "Beach name '{}' collides with the itinerary storage key",
                        app_config.itinerary_key
                    );
                }
                *self.catalog.write().await = catalog;
                *self.load_failure.write().await = None;
                *initialized = true;
                tracing::info!("Application state initialized");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error loading beach data: {}", e);
                *self.catalog.write().await = Catalog::default();
                *self.load_failure.write().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Last dataset load failure, if the catalog could not be loaded
    pub async fn load_failure(&self) -> Option<String> {
        self.load_failure.read().await.clone()
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check if the storage backend is healthy
    pub fn is_storage_healthy(&self) -> bool {
        // Use try_read to avoid blocking
        if let Ok(guard) = self.backend.try_read() {
            if let Some(ref backend) = *guard {
                return backend.is_healthy();
            }
        }
        false
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Check if the catalog holds any beaches
    pub fn is_catalog_loaded(&self) -> bool {
        if let Ok(guard) = self.catalog.try_read() {
            return !guard.is_empty();
        }
        false
    }

    /// Bytes used and capacity of the storage backend
    pub async fn storage_usage(&self) -> AppResult<(u64, Option<u64>)> {
        let guard = self.backend.read().await;
        match &*guard {
            Some(backend) => Ok((backend.usage_bytes()?, backend.quota_bytes())),
            None => Err(AppError::internal("Storage not initialized")),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration; new image settings apply to later additions
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let updated = {
            let mut guard = self.config.write().await;
            match &mut *guard {
                Some(config) => config.update_config(update)?,
                None => return Err(AppError::config("Config service not initialized")),
            }
        };

        if let Some(store) = self.memory_store.write().await.as_mut() {
            store.set_codec(ImageCodec::from_config(&updated));
        }
        Ok(updated)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// All beaches in dataset order
    pub async fn beaches(&self) -> Vec<Beach> {
        self.catalog.read().await.beaches().to_vec()
    }

    /// A single beach by name
    pub async fn beach(&self, name: &str) -> AppResult<Beach> {
        self.catalog
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Beach not found: {}", name)))
    }

    /// Beaches matching a search query and optional category
    pub async fn search_beaches(&self, query: &str, category: Option<BeachCategory>) -> Vec<Beach> {
        self.catalog
            .read()
            .await
            .search(query, category)
            .into_iter()
            .cloned()
            .collect()
    }

    // ========================================================================
    // Memories
    // ========================================================================

    /// Current memories of a beach
    pub async fn memories(&self, name: &str) -> AppResult<Vec<Memory>> {
        Ok(self.beach(name).await?.memories)
    }

    /// Validate, resize and store a new memory for the named beach.
    ///
    /// Image work runs before the catalog lock is taken; the append and the
    /// storage write happen together under it.
    pub async fn add_memory(
        &self,
        name: &str,
        image: Option<Vec<u8>>,
        note: Option<&str>,
    ) -> AppResult<Memory> {
        let store_guard = self.memory_store.read().await;
        let store = store_guard
            .as_ref()
            .ok_or_else(|| AppError::internal("Memory store not initialized"))?;

        if self.catalog.read().await.get(name).is_none() {
            return Err(AppError::not_found(format!("Beach not found: {}", name)));
        }

        let memory = store.prepare_memory(image, note).await?;

        let mut catalog = self.catalog.write().await;
        let beach = catalog
            .get_mut(name)
            .ok_or_else(|| AppError::not_found(format!("Beach not found: {}", name)))?;
        store.append_memory(beach, memory.clone())?;
        Ok(memory)
    }

    // ========================================================================
    // Itinerary
    // ========================================================================

    /// Itinerary names in insertion order, including stale ones
    pub async fn itinerary(&self) -> AppResult<Vec<String>> {
        let guard = self.itinerary.read().await;
        match &*guard {
            Some(itinerary) => Ok(itinerary.entries().to_vec()),
            None => Err(AppError::internal("Itinerary not initialized")),
        }
    }

    /// Itinerary beaches in order, skipping names not in the catalog
    pub async fn itinerary_beaches(&self) -> AppResult<Vec<Beach>> {
        let guard = self.itinerary.read().await;
        let itinerary = guard
            .as_ref()
            .ok_or_else(|| AppError::internal("Itinerary not initialized"))?;
        let catalog = self.catalog.read().await;
        Ok(itinerary.resolve(&catalog).into_iter().cloned().collect())
    }

    /// Add or remove a beach from the itinerary.
    ///
    /// Unknown names can be removed but not added.
    pub async fn toggle_itinerary(&self, name: &str) -> AppResult<Vec<String>> {
        let mut guard = self.itinerary.write().await;
        let itinerary = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Itinerary not initialized"))?;

        if !itinerary.contains(name) && self.catalog.read().await.get(name).is_none() {
            return Err(AppError::not_found(format!("Beach not found: {}", name)));
        }
        itinerary.toggle(name)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}
