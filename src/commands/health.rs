//! Health Check Commands
//!
//! Commands for checking the health status of backend services.

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Get the health status of storage, config and the catalog
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    let mut health = HealthResponse::default();

    health.storage = state.is_storage_healthy();
    health.config = state.is_config_healthy();
    health.catalog_loaded = state.is_catalog_loaded();

    if let Ok((used, quota)) = state.storage_usage().await {
        health.storage_used_bytes = used;
        health.storage_quota_bytes = quota;
    }

    // An empty catalog is a degraded but usable state
    health.status = if health.storage && health.config && health.catalog_loaded {
        "healthy".to_string()
    } else {
        "degraded".to_string()
    };

    CommandResponse::ok(health)
}
