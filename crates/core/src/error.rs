//! Core Error Types
//!
//! Defines the foundational error types used across the Beach Atlas workspace.
//! These error types are dependency-free (only thiserror + std) to keep the core
//! crate lightweight. They cover what a storage backend can report; the main
//! application crate wraps them in its own `Persistence` variant.

use thiserror::Error;

/// Core error type for the Beach Atlas workspace.
///
/// Storage backends report through `QuotaExceeded` and `Storage`; the
/// application crate folds both into its persistence failure.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A write would push the store past its capacity
    #[error("Storage quota exceeded writing '{key}': {required} bytes required, {available} available")]
    QuotaExceeded {
        key: String,
        required: u64,
        available: u64,
    },

    /// Backend read/write failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is a capacity rejection rather than a backend fault
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}
