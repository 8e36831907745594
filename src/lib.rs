//! Beach Atlas - Rust Backend Library
//!
//! This library provides the backend of the Beach Atlas map application.
//! It includes:
//! - Command handlers for the presentation layer
//! - Catalog, memory, itinerary and image services
//! - Storage layer (SQLite key-value store, JSON config)
//! - Data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used items from commands
pub use commands::{
    // Init commands
    init_app, get_version,
    // Health commands
    get_health,
    // Settings commands
    get_settings, update_settings,
    // Catalog commands
    list_beaches, get_beach, search_beaches,
    // Memory commands
    add_memory, list_memories,
    // Itinerary commands
    get_itinerary, toggle_itinerary,
};
// Re-export models (avoiding settings module conflict)
pub use models::beach::{Beach, BeachCategory, Memory};
pub use models::response::*;
pub use models::settings::{AppConfig, MapView, SettingsUpdate};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
