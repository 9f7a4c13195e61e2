//! Alliance roster upload.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use midguardians_db::models::alliance::{AllianceRegistration, CreateAlliance};
use midguardians_db::repositories::AllianceRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/alliances
///
/// Register an alliance for a zone. Unknown character names are reported in
/// `skipped` rather than rejected.
pub async fn register_alliance(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateAlliance>,
) -> AppResult<(StatusCode, Json<DataResponse<AllianceRegistration>>)> {
    let registration = AllianceRepo::register(&state.pool, Some(user.user_id), &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: registration }),
    ))
}
