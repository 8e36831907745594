//! Memory Commands
//!
//! Attach photo+note memories to beaches and read them back.

use crate::models::beach::Memory;
use crate::models::response::CommandResponse;
use crate::state::AppState;

/// Add a memory to the named beach.
///
/// `image` holds the raw bytes of the selected file; `note` is the user's
/// text. Both are required.
pub async fn add_memory(
    state: &AppState,
    name: String,
    image: Option<Vec<u8>>,
    note: Option<String>,
) -> CommandResponse<Memory> {
    state.add_memory(&name, image, note.as_deref()).await.into()
}

/// List the memories of the named beach, oldest first
pub async fn list_memories(state: &AppState, name: String) -> CommandResponse<Vec<Memory>> {
    state.memories(&name).await.into()
}
