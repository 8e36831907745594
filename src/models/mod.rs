//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod beach;
pub mod response;
pub mod settings;

pub use beach::*;
pub use response::*;
pub use settings::*;
