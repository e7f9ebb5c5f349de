use axum::Json;
use axum::extract::State;
use rollgate_core::AppError;
use rollgate_models::{MessageResponse, PasswordChangeRequestDto};
use tracing::instrument;

use super::service::StudentService;
use crate::extract::AppJson;
use crate::state::AppState;

/// Ask for a password change on a student record
#[utoipa::path(
    post,
    path = "/api/students/password-change-requests",
    request_body = PasswordChangeRequestDto,
    responses(
        (status = 200, description = "Request recorded", body = MessageResponse),
        (status = 400, description = "Email or roll missing", body = rollgate_core::ErrorResponse),
        (status = 404, description = "No matching student", body = rollgate_core::ErrorResponse),
        (status = 500, description = "Request could not be saved", body = rollgate_core::ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn request_password_change(
    State(state): State<AppState>,
    AppJson(dto): AppJson<PasswordChangeRequestDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = StudentService::request_password_change(state.students.as_ref(), dto).await?;
    Ok(Json(response))
}
