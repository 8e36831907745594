//! Catalog Commands
//!
//! Read-only access to the loaded beaches.

use crate::models::beach::{Beach, BeachCategory};
use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::AppError;

/// List all beaches in dataset order
pub async fn list_beaches(state: &AppState) -> CommandResponse<Vec<Beach>> {
    CommandResponse::ok(state.beaches().await)
}

/// Get a single beach by name
pub async fn get_beach(state: &AppState, name: String) -> CommandResponse<Beach> {
    state.beach(&name).await.into()
}

/// Search beaches by free text, optionally restricted to a category
/// (`popular`, `serene` or `adventure`)
pub async fn search_beaches(
    state: &AppState,
    query: String,
    category: Option<String>,
) -> CommandResponse<Vec<Beach>> {
    let category = match category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => match BeachCategory::parse(raw) {
            Some(parsed) => Some(parsed),
            None => {
                return CommandResponse::from_error(&AppError::validation(format!(
                    "Unknown beach category: {}",
                    raw
                )))
            }
        },
        None => None,
    };

    CommandResponse::ok(state.search_beaches(&query, category).await)
}
