//! Handlers for store maintenance under `/admin`.

use axum::extract::State;
use axum::Json;
use yacc_core::allocator::{ConnectionReport, InitReport};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/initialize
///
/// Create the `Registrations` and `Waitlist` collections if missing.
pub async fn initialize_store(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<InitReport>>> {
    let report = state.allocator.initialize().await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/admin/connection
pub async fn check_connection(State(state): State<AppState>) -> Json<DataResponse<ConnectionReport>> {
    Json(DataResponse {
        data: state.allocator.check_connection().await,
    })
}
