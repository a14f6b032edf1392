use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(admin::initialize_store))
        .route("/connection", get(admin::check_connection))
}
