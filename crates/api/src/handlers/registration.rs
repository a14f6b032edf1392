//! Handlers for the `/registrations` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};
use yacc_core::form::RegistrationForm;
use yacc_core::outcome::{PublicStatus, SubmissionResult};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations
///
/// Accepts the raw form object. Confirmed, waitlisted, and failed
/// submissions all return 200 with the outcome in `data`; only a body that
/// is not a JSON object is rejected.
pub async fn submit_registration(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<Json<DataResponse<SubmissionResult>>> {
    let Json(fields) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let form = RegistrationForm::from_fields(&fields);
    let result = state.allocator.submit(&form).await;

    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/registrations/status
///
/// Public occupancy snapshot.
pub async fn registration_status(
    State(state): State<AppState>,
) -> Json<DataResponse<PublicStatus>> {
    Json(DataResponse {
        data: state.allocator.public_status().await,
    })
}
