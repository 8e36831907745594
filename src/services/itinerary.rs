//! Itinerary Store
//!
//! The user's selection of beaches, persisted under one well-known key as a
//! JSON array of beach names in insertion order. Every mutation is written
//! through immediately.

use std::sync::Arc;

use beach_atlas_core::KeyValueStore;

use crate::models::beach::Beach;
use crate::services::catalog::Catalog;
use crate::utils::error::{AppError, AppResult};

/// Ordered set of beach names
pub struct ItineraryStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<String>,
    /// Name and position of the most recent removal, if it was the last change
    last_removed: Option<(String, usize)>,
}

impl ItineraryStore {
    /// Create an empty store bound to `key`; call `load` to read it
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            entries: Vec::new(),
            last_removed: None,
        }
    }

    /// Replace the in-memory set with the stored one.
    ///
    /// A missing, unreadable or malformed value yields an empty itinerary.
    pub fn load(&mut self) -> &[String] {
        self.last_removed = None;
        self.entries = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => match parse_itinerary(&raw) {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!("Invalid itinerary format, starting fresh: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read itinerary: {}", e);
                Vec::new()
            }
        };
        &self.entries
    }

    /// Add `name` if absent, remove it if present, then persist.
    ///
    /// New names go to the end. Re-adding the name removed by the previous
    /// toggle puts it back where it was, so toggling twice in a row restores
    /// the stored value exactly. If the write fails the toggle is undone and
    /// `Persistence` is returned.
    pub fn toggle(&mut self, name: &str) -> AppResult<Vec<String>> {
        let undo = self.last_removed.take();
        let (removed, index) = match self.entries.iter().position(|entry| entry == name) {
            Some(index) => {
                self.entries.remove(index);
                (true, index)
            }
            None => {
                let index = match &undo {
                    Some((last, at)) if last == name => (*at).min(self.entries.len()),
                    _ => self.entries.len(),
                };
                self.entries.insert(index, name.to_string());
                (false, index)
            }
        };

        if let Err(e) = self.persist() {
            if removed {
                self.entries.insert(index, name.to_string());
            } else {
                self.entries.remove(index);
            }
            self.last_removed = undo;
            tracing::warn!("Failed to save itinerary, reverted toggle of {}: {}", name, e);
            return Err(e);
        }

        if removed {
            self.last_removed = Some((name.to_string(), index));
        }
        Ok(self.entries.clone())
    }

    /// Write the current set, in insertion order, under the itinerary key.
    pub fn persist(&self) -> AppResult<()> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.backend.set_item(&self.key, &serialized)?;
        tracing::debug!("Persisted itinerary with {} entries", self.entries.len());
        Ok(())
    }

    /// Whether `name` is in the itinerary
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    /// Names in insertion order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Beaches in itinerary order. Names no longer in the catalog are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Beach> {
        self.entries
            .iter()
            .filter_map(|name| {
                let beach = catalog.get(name);
                if beach.is_none() {
                    tracing::debug!("Skipping unknown itinerary entry: {}", name);
                }
                beach
            })
            .collect()
    }
}

/// Parse a stored itinerary, dropping duplicate names.
pub fn parse_itinerary(raw: &str) -> AppResult<Vec<String>> {
    let names: Vec<String> =
        serde_json::from_str(raw).map_err(|e| AppError::parse(e.to_string()))?;
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    Ok(unique)
}
