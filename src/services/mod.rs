//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod catalog;
pub mod image_codec;
pub mod itinerary;
pub mod memories;

pub use catalog::{dataset_source_for, Catalog, DatasetSource, FileDatasetSource, HttpDatasetSource};
pub use image_codec::ImageCodec;
pub use itinerary::ItineraryStore;
pub use memories::MemoryStore;
