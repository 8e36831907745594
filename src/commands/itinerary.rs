//! Itinerary Commands

use crate::models::beach::Beach;
use crate::models::response::CommandResponse;
use crate::state::AppState;

/// Get the itinerary as beaches, in the order they were added
pub async fn get_itinerary(state: &AppState) -> CommandResponse<Vec<Beach>> {
    state.itinerary_beaches().await.into()
}

/// Add the named beach to the itinerary, or remove it if already present.
/// Returns the itinerary names after the change.
pub async fn toggle_itinerary(state: &AppState, name: String) -> CommandResponse<Vec<String>> {
    state.toggle_itinerary(&name).await.into()
}
