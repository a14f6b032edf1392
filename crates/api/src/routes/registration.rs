//! Route definitions for the `/registrations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST   /          -> submit_registration
/// GET    /status    -> registration_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::submit_registration))
        .route("/status", get(registration::registration_status))
}
