pub mod admin;
pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /registrations                 submit (POST)
/// /registrations/status          public status (GET)
///
/// /admin/initialize              ensure collections (POST)
/// /admin/connection              store connectivity (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/registrations", registration::router())
        .nest("/admin", admin::router())
}
