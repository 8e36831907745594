//! Utilities
//!
//! Error types and filesystem locations shared across the application.

pub mod error;
pub mod paths;

pub use error::*;
pub use paths::*;
