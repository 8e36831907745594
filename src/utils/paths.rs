//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under ~/.beach-atlas/.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Beach Atlas directory (~/.beach-atlas/)
pub fn beach_atlas_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".beach-atlas"))
}

/// Get the config file path (~/.beach-atlas/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(beach_atlas_dir()?.join("config.json"))
}

/// Get the local storage database path (~/.beach-atlas/local-storage.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(beach_atlas_dir()?.join("local-storage.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Beach Atlas directory, creating if it doesn't exist
pub fn ensure_beach_atlas_dir() -> AppResult<PathBuf> {
    let path = beach_atlas_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
