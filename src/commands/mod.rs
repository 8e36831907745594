//! Commands
//!
//! Entry points for the presentation layer. Every command takes the shared
//! `AppState` and returns a `CommandResponse`.

pub mod catalog;
pub mod health;
pub mod init;
pub mod itinerary;
pub mod memories;
pub mod settings;

pub use catalog::*;
pub use health::*;
pub use init::*;
pub use itinerary::*;
pub use memories::*;
pub use settings::*;
