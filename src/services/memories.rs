//! Beach Memory Store
//!
//! Owns the lifecycle of the photo+note memories attached to each beach,
//! mediating between the in-memory `Beach::memories` sequence and the local
//! key-value store. Memories for a beach are stored as one JSON array under
//! the beach's name.
//!
//! ## Guarantees
//!
//! - Malformed stored data for one beach degrades that beach to "no
//!   memories" and never affects the others.
//! - After `add_memory` returns, the in-memory sequence matches what is
//!   durably stored: a failed write rolls the append back.

use std::sync::Arc;

use beach_atlas_core::{escape_html, KeyValueStore};

use crate::models::beach::{Beach, Memory};
use crate::services::image_codec::ImageCodec;
use crate::utils::error::{AppError, AppResult};

/// Field name reported when no photo was supplied
pub const PHOTO_FIELD: &str = "photo";
/// Field name reported when the note is missing or blank
pub const NOTE_FIELD: &str = "note";

/// Core store for beach memories
pub struct MemoryStore {
    backend: Arc<dyn KeyValueStore>,
    codec: ImageCodec,
}

impl MemoryStore {
    /// Create a store writing through `backend` and resizing with `codec`
    pub fn new(backend: Arc<dyn KeyValueStore>, codec: ImageCodec) -> Self {
        Self { backend, codec }
    }

    /// Current resize parameters
    pub fn codec(&self) -> ImageCodec {
        self.codec
    }

    /// Replace the resize parameters used for future additions
    pub fn set_codec(&mut self, codec: ImageCodec) {
        self.codec = codec;
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Populate every beach's memories from storage.
    ///
    /// Never fails: a beach whose stored value is missing, unreadable or
    /// malformed ends up with an empty sequence.
    pub fn load_all(&self, beaches: &mut [Beach]) {
        let mut loaded = 0usize;
        for beach in beaches.iter_mut() {
            beach.memories = self.stored_memories(&beach.name);
            loaded += beach.memories.len();
        }
        tracing::info!(
            "Loaded {} memories across {} beaches",
            loaded,
            beaches.len()
        );
    }

    /// Read the durable copy of a beach's memories, applying the same
    /// recovery policy as `load_all`.
    pub fn stored_memories(&self, name: &str) -> Vec<Memory> {
        let raw = match self.backend.get_item(name) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read memories for {}: {}", name, e);
                return Vec::new();
            }
        };

        match parse_memories(&raw) {
            Ok(memories) => memories,
            Err(e) => {
                tracing::warn!("Invalid memory format for {}, starting fresh: {}", name, e);
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Attach a new memory to `beach`.
    ///
    /// Both a non-empty image and a non-blank note are required; otherwise
    /// `MissingFields` names what is absent and nothing changes. The image is
    /// resized before any mutation, so a `Decode` error also leaves the beach
    /// untouched. If the storage write fails the appended memory is removed
    /// again and `Persistence` is returned.
    pub async fn add_memory(
        &self,
        beach: &mut Beach,
        image: Option<Vec<u8>>,
        note: Option<&str>,
    ) -> AppResult<Memory> {
        let memory = self.prepare_memory(image, note).await?;
        self.append_memory(beach, memory.clone())?;
        Ok(memory)
    }

    /// Validate the inputs and build a memory without touching any beach.
    ///
    /// The note is escaped here, exactly once.
    pub async fn prepare_memory(
        &self,
        image: Option<Vec<u8>>,
        note: Option<&str>,
    ) -> AppResult<Memory> {
        let (image, note) = validate_input(image, note)?;
        let photo = self.codec.encode(image).await?;
        Ok(Memory {
            photo,
            note: escape_html(note),
        })
    }

    /// Append a prepared memory and persist, undoing the append if the
    /// write fails.
    pub fn append_memory(&self, beach: &mut Beach, memory: Memory) -> AppResult<()> {
        beach.memories.push(memory);
        if let Err(e) = self.persist(beach) {
            beach.memories.pop();
            tracing::warn!("Failed to save memory for {}, reverted: {}", beach.name, e);
            return Err(e);
        }

        tracing::info!(
            "Added memory to {} ({} total)",
            beach.name,
            beach.memories.len()
        );
        Ok(())
    }

    /// Write the beach's full memory sequence under its name.
    pub fn persist(&self, beach: &Beach) -> AppResult<()> {
        let serialized = serde_json::to_string(&beach.memories)?;
        self.backend.set_item(&beach.name, &serialized)?;
        tracing::debug!(
            "Persisted {} memories for {} ({} bytes)",
            beach.memories.len(),
            beach.name,
            serialized.len()
        );
        Ok(())
    }
}

/// Check that both inputs are present, reporting every missing field.
fn validate_input(image: Option<Vec<u8>>, note: Option<&str>) -> AppResult<(Vec<u8>, &str)> {
    let image = image.filter(|bytes| !bytes.is_empty());
    let note = note.filter(|text| !text.trim().is_empty());

    match (image, note) {
        (Some(image), Some(note)) => Ok((image, note)),
        (image, note) => {
            let mut missing = Vec::new();
            if image.is_none() {
                missing.push(PHOTO_FIELD.to_string());
            }
            if note.is_none() {
                missing.push(NOTE_FIELD.to_string());
            }
            Err(AppError::MissingFields(missing))
        }
    }
}

/// Parse a stored value as a sequence of memories.
pub fn parse_memories(raw: &str) -> AppResult<Vec<Memory>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| AppError::parse(e.to_string()))?;
    if !value.is_array() {
        return Err(AppError::parse("expected an array of memories"));
    }
    serde_json::from_value(value).map_err(|e| AppError::parse(e.to_string()))
}
