//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

/// Map position shown when the user's location is unavailable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        // Centre of Kerala
        Self {
            lat: 10.8505,
            lng: 76.2711,
            zoom: 7,
        }
    }
}

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the beach dataset comes from: an http(s) URL or a file path
    pub dataset_source: String,
    /// Longest side, in pixels, of a stored memory photo
    pub max_image_dimension: u32,
    /// JPEG quality for stored photos, 0.0 to 1.0
    pub image_quality: f32,
    /// Capacity of the local key-value store in bytes
    pub storage_quota_bytes: u64,
    /// Storage key holding the itinerary
    #[serde(default = "default_itinerary_key")]
    pub itinerary_key: String,
    /// Fallback map view
    #[serde(default)]
    pub default_view: MapView,
}

fn default_itinerary_key() -> String {
    "itinerary".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_source: "beaches.json".to_string(),
            max_image_dimension: 800,
            image_quality: 0.7,
            storage_quota_bytes: 5 * 1024 * 1024,
            itinerary_key: default_itinerary_key(),
            default_view: MapView::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub dataset_source: Option<String>,
    pub max_image_dimension: Option<u32>,
    pub image_quality: Option<f32>,
    pub storage_quota_bytes: Option<u64>,
    pub default_view: Option<MapView>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(source) = update.dataset_source {
            self.dataset_source = source;
        }
        if let Some(dimension) = update.max_image_dimension {
            self.max_image_dimension = dimension;
        }
        if let Some(quality) = update.image_quality {
            self.image_quality = quality;
        }
        if let Some(quota) = update.storage_quota_bytes {
            self.storage_quota_bytes = quota;
        }
        if let Some(view) = update.default_view {
            self.default_view = view;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dataset_source.trim().is_empty() {
            return Err("dataset_source cannot be empty".to_string());
        }

        if self.max_image_dimension == 0 {
            return Err("max_image_dimension must be at least 1".to_string());
        }

        if !(0.0..=1.0).contains(&self.image_quality) {
            return Err(format!(
                "Invalid image_quality: {}. Must be between 0.0 and 1.0",
                self.image_quality
            ));
        }

        if self.storage_quota_bytes == 0 {
            return Err("storage_quota_bytes must be greater than 0".to_string());
        }

        if self.itinerary_key.is_empty() {
            return Err("itinerary_key cannot be empty".to_string());
        }

        if self.default_view.zoom > 19 {
            return Err(format!(
                "Invalid default zoom: {}. Must be between 0 and 19",
                self.default_view.zoom
            ));
        }

        Ok(())
    }
}
