//! Beach Models
//!
//! The points of interest shown on the map, and the memories users attach
//! to them.

use serde::{Deserialize, Serialize};

/// Closed set of beach categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeachCategory {
    Popular,
    Serene,
    Adventure,
}

impl BeachCategory {
    /// Convert to dataset string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BeachCategory::Popular => "popular",
            BeachCategory::Serene => "serene",
            BeachCategory::Adventure => "adventure",
        }
    }

    /// Parse from dataset string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(BeachCategory::Popular),
            "serene" => Some(BeachCategory::Serene),
            "adventure" => Some(BeachCategory::Adventure),
            _ => None,
        }
    }
}

impl std::fmt::Display for BeachCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-authored photo and note attached to a beach.
///
/// `photo` is a self-contained `data:` URL and `note` is already escaped
/// for markup; both are stored exactly as serialized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub photo: String,
    pub note: String,
}

/// Highest rating rendered by `Beach::star_rating`
pub const MAX_RATING: f64 = 5.0;

/// A beach from the startup dataset.
///
/// `name` is the identity and the storage key for the beach's memories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beach {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub category: BeachCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default, alias = "bestTime")]
    pub best_time: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    /// Populated from storage after load
    #[serde(default)]
    pub memories: Vec<Memory>,
}

impl Beach {
    /// Create a beach with the required fields
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, category: BeachCategory) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            category,
            description: String::new(),
            features: Vec::new(),
            rating: 0.0,
            reviews: 0,
            best_time: None,
            activities: Vec::new(),
            memories: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set feature tags
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    /// Builder: set rating and review count
    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Rating as stars: one `★` per whole point, plus `☆` for any fraction.
    /// Ratings outside `0..=5` are clamped.
    pub fn star_rating(&self) -> String {
        let rating = self.rating.max(0.0).min(MAX_RATING);
        let full = rating.floor() as usize;
        let mut stars = "★".repeat(full);
        if rating.fract() != 0.0 {
            stars.push('☆');
        }
        stars
    }
}
