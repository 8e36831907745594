//! Initialization Commands
//!
//! Commands for application initialization and setup.
//! On startup, loads the configuration, opens local storage, restores the
//! itinerary and loads the beach dataset with its stored memories.

use serde::{Deserialize, Serialize};

use crate::models::response::CommandResponse;
use crate::state::AppState;

/// Result of application initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResult {
    /// Success message
    pub message: String,
    /// Number of beaches in the catalog
    pub beach_count: usize,
    /// Number of names in the stored itinerary
    pub itinerary_count: usize,
}

/// Initialize the application on startup.
///
/// A dataset failure is reported as `load_failure`; the state stays usable
/// with an empty catalog and the command may be called again.
pub async fn init_app(state: &AppState) -> CommandResponse<InitResult> {
    if let Err(e) = state.initialize().await {
        return CommandResponse::from_error(&e);
    }

    let beach_count = state.beaches().await.len();
    let itinerary_count = state.itinerary().await.map(|names| names.len()).unwrap_or(0);

    CommandResponse::ok(InitResult {
        message: format!(
            "Application initialized successfully with {} beaches",
            beach_count
        ),
        beach_count,
        itinerary_count,
    })
}

/// Get the application version
pub fn get_version() -> CommandResponse<String> {
    CommandResponse::ok(env!("CARGO_PKG_VERSION").to_string())
}
