use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the store answered a collection listing.
    pub store_healthy: bool,
    /// Configured size of the confirmed slot pool.
    pub max_slots: u32,
}

/// GET /health -- returns service and store health plus the configured slot pool.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.allocator.check_connection().await.success;

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
        max_slots: state.config.event.max_slots,
    })
}

/// Mount health check routes (root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
