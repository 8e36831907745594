//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use beach_atlas_core::CoreError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The supplied image bytes could not be decoded
    #[error("Image decode error: {0}")]
    Decode(String),

    /// Required memory inputs were not supplied
    #[error("Validation error: missing {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The storage write failed; in-memory state was rolled back
    #[error("Persistence error: {0}")]
    Persistence(#[from] CoreError),

    /// Malformed stored data (contained and logged, never surfaced to the user)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The startup dataset could not be loaded
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an image decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a load failure
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "decode_error",
            AppError::MissingFields(_) | AppError::Validation(_) => "validation_failure",
            AppError::Persistence(_) | AppError::Sqlite(_) => "persistence_failure",
            AppError::Parse(_) => "parse_failure",
            AppError::LoadFailure(_) => "load_failure",
            AppError::Config(_) => "config_error",
            AppError::Io(_) => "io_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }
}

/// Convert AppError to a string suitable for command responses
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
