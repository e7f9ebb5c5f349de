use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use rollgate_core::AppError;
use rollgate_models::{EmailConfirmationQuery, MessageResponse, RegisterResponse};
use serde_json::{Map, Value};
use tracing::instrument;

use super::service::{AuthService, ConfirmationOutcome};
use crate::extract::AppJson;
use crate::state::AppState;

/// Register a student account with an institutional email and roll number
#[utoipa::path(
    post,
    path = "/api/auth/local/register",
    request_body = rollgate_models::RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input, email, roll number or password format", body = rollgate_core::ErrorResponse),
        (status = 403, description = "Registration is disabled", body = rollgate_core::ErrorResponse),
        (status = 409, description = "Email or username already taken", body = rollgate_core::ErrorResponse),
        (status = 500, description = "Configuration or persistence failure", body = rollgate_core::ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    body: Result<AppJson<Map<String, Value>>, AppError>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if !state.registration_config.allow_register {
        return Err(AppError::registration_disabled());
    }
    let AppJson(body) = body?;

    let response = AuthService::register(
        state.users.as_ref(),
        state.roles.as_ref(),
        state.confirmations.as_ref(),
        body,
        &state.registration_config,
        &state.jwt_config,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Confirm an email address with the token from the confirmation email
#[utoipa::path(
    get,
    path = "/api/auth/email-confirmation",
    params(EmailConfirmationQuery),
    responses(
        (status = 200, description = "Email confirmed", body = MessageResponse),
        (status = 303, description = "Email confirmed, redirecting to the configured page"),
        (status = 400, description = "Missing or invalid token", body = rollgate_core::ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<EmailConfirmationQuery>,
) -> Result<Response, AppError> {
    let outcome = AuthService::confirm_email(
        state.users.as_ref(),
        query.confirmation,
        &state.registration_config,
    )
    .await?;

    Ok(match outcome {
        ConfirmationOutcome::Redirect(url) => Redirect::to(&url).into_response(),
        ConfirmationOutcome::Confirmed => Json(MessageResponse {
            message: "Your email has been confirmed".to_string(),
        })
        .into_response(),
    })
}
