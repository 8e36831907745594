//! Beach Catalog
//!
//! The immutable list of beaches loaded once at startup, each augmented with
//! its stored memories. The dataset itself comes from a `DatasetSource`;
//! there is no automatic retry when fetching it fails.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::beach::{Beach, BeachCategory};
use crate::services::memories::MemoryStore;
use crate::utils::error::{AppError, AppResult};

/// Async source of the startup dataset
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;

    /// Fetch and parse the full list of beaches
    async fn fetch(&self) -> AppResult<Vec<Beach>>;
}

/// Dataset served over HTTP(S)
pub struct HttpDatasetSource {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpDatasetSource {
    pub fn new(url: url::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> AppResult<Vec<Beach>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| AppError::load_failure(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::load_failure(format!(
                "{} returned HTTP {}",
                self.url,
                response.status().as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::load_failure(format!("Failed to read response: {}", e)))?;
        parse_dataset(&body)
    }
}

/// Dataset read from a local JSON file
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> AppResult<Vec<Beach>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::load_failure(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        parse_dataset(&body)
    }
}

/// Pick a source for a configured location: http(s) URLs are fetched over
/// the network, anything else is treated as a file path.
pub fn dataset_source_for(location: &str) -> Box<dyn DatasetSource> {
    match url::Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Box::new(HttpDatasetSource::new(url))
        }
        _ => Box::new(FileDatasetSource::new(location)),
    }
}

/// Parse the dataset body as a JSON array of beaches.
pub fn parse_dataset(body: &str) -> AppResult<Vec<Beach>> {
    serde_json::from_str(body)
        .map_err(|e| AppError::load_failure(format!("Invalid beach dataset: {}", e)))
}

/// Loaded beaches in dataset order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    beaches: Vec<Beach>,
}

impl Catalog {
    /// Build a catalog from already-fetched beaches.
    ///
    /// Names are identities, so a repeated name keeps its first occurrence.
    pub fn from_beaches(beaches: Vec<Beach>) -> Self {
        let mut seen = HashSet::new();
        let beaches = beaches
            .into_iter()
            .filter(|beach| {
                let first = seen.insert(beach.name.clone());
                if !first {
                    tracing::warn!("Dropping duplicate beach in dataset: {}", beach.name);
                }
                first
            })
            .collect();
        Self { beaches }
    }

    /// Fetch the dataset and load every beach's memories.
    ///
    /// Any fetch or parse failure is reported as `LoadFailure`; recovery is
    /// left to the user.
    pub async fn initialize(
        source: &dyn DatasetSource,
        memories: &MemoryStore,
    ) -> AppResult<Self> {
        let beaches = source.fetch().await.map_err(|e| match e {
            AppError::LoadFailure(_) => e,
            other => AppError::load_failure(other.to_string()),
        })?;

        let mut catalog = Self::from_beaches(beaches);
        memories.load_all(&mut catalog.beaches);
        tracing::info!(
            "Loaded {} beaches from {}",
            catalog.len(),
            source.describe()
        );
        Ok(catalog)
    }

    /// All beaches in dataset order
    pub fn beaches(&self) -> &[Beach] {
        &self.beaches
    }

    /// Look up a beach by name
    pub fn get(&self, name: &str) -> Option<&Beach> {
        self.beaches.iter().find(|beach| beach.name == name)
    }

    /// Mutable lookup; only `memories` should be changed through it
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Beach> {
        self.beaches.iter_mut().find(|beach| beach.name == name)
    }

    pub fn len(&self) -> usize {
        self.beaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beaches.is_empty()
    }

    /// Beaches whose name, description or features contain `query`
    /// (case-insensitive), optionally restricted to one category.
    /// A blank query matches everything.
    pub fn search(&self, query: &str, category: Option<BeachCategory>) -> Vec<&Beach> {
        let needle = query.trim().to_lowercase();
        self.beaches
            .iter()
            .filter(|beach| category.map_or(true, |c| beach.category == c))
            .filter(|beach| {
                needle.is_empty()
                    || beach.name.to_lowercase().contains(&needle)
                    || beach.description.to_lowercase().contains(&needle)
                    || beach
                        .features
                        .iter()
                        .any(|feature| feature.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
