use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use rollgate_core::AppError;
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejections are reported as [`AppError`] with kind `invalid_input`.
///
/// Field-level validation stays in the services, after the feature gate and
/// body sanitizing have run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(AppJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::invalid_input([format!("{} is required", field)]);
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::invalid_input(["Missing 'Content-Type: application/json' header"])
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::invalid_input(["Request body is not valid JSON"])
        }
        JsonRejection::JsonDataError(_) => {
            AppError::invalid_input(["Invalid field type in request"])
        }
        _ => AppError::invalid_input(["Invalid request body"]),
    }
}
