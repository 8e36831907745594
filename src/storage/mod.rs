//! Storage Layer
//!
//! Handles all data persistence: the SQLite-backed local key-value store and
//! the JSON config file.

pub mod config;
pub mod database;

pub use config::*;
pub use database::*;
