//! Application error taxonomy.
//!
//! Every failure leaving a service is an [`AppError`] carrying a stable
//! [`ErrorKind`], the HTTP status derived from it, the underlying error for
//! logging, and the list of human-readable messages sent to the client.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Machine-classifiable failure kind, serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InvalidEmail,
    InvalidRollIdentifier,
    InvalidCredentialFormat,
    EmailTaken,
    UsernameTaken,
    RegistrationDisabled,
    ConfigurationError,
    NotFound,
    PersistenceError,
    RegistrationFailed,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput
            | Self::InvalidEmail
            | Self::InvalidRollIdentifier
            | Self::InvalidCredentialFormat => StatusCode::BAD_REQUEST,
            Self::RegistrationDisabled => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::ConfigurationError
            | Self::PersistenceError
            | Self::RegistrationFailed
            | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidRollIdentifier => "invalid_roll_identifier",
            Self::InvalidCredentialFormat => "invalid_credential_format",
            Self::EmailTaken => "email_taken",
            Self::UsernameTaken => "username_taken",
            Self::RegistrationDisabled => "registration_disabled",
            Self::ConfigurationError => "configuration_error",
            Self::NotFound => "not_found",
            Self::PersistenceError => "persistence_error",
            Self::RegistrationFailed => "registration_failed",
            Self::Internal => "internal",
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// First (or only) message, kept for clients that read a single string
    pub error: String,
    pub kind: ErrorKind,
    pub messages: Vec<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
    pub messages: Vec<String>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        let error = err.into();
        Self {
            status: kind.status(),
            kind,
            messages: vec![error.to_string()],
            error,
        }
    }

    /// Builds an error whose client-facing messages differ from the logged error.
    pub fn with_messages<E>(kind: ErrorKind, err: E, messages: Vec<String>) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.status(),
            kind,
            error: err.into(),
            messages,
        }
    }

    /// One message per offending field, e.g. `["email is required"]`.
    pub fn invalid_input<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        Self::with_messages(
            ErrorKind::InvalidInput,
            anyhow!("Invalid input: {}", messages.join(", ")),
            messages,
        )
    }

    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        // field_errors() is a HashMap; keep the response stable
        messages.sort();
        Self::invalid_input(messages)
    }

    pub fn invalid_email() -> Self {
        Self::new(
            ErrorKind::InvalidEmail,
            anyhow!("Email must be a valid institutional email address"),
        )
    }

    pub fn invalid_roll_identifier() -> Self {
        Self::new(
            ErrorKind::InvalidRollIdentifier,
            anyhow!("Username must be a valid roll number of a current batch"),
        )
    }

    pub fn invalid_credential_format() -> Self {
        Self::new(
            ErrorKind::InvalidCredentialFormat,
            anyhow!("Your password looks like an already hashed value"),
        )
    }

    pub fn email_taken() -> Self {
        Self::new(ErrorKind::EmailTaken, anyhow!("Email is already taken"))
    }

    pub fn username_taken() -> Self {
        Self::new(ErrorKind::UsernameTaken, anyhow!("Username already taken"))
    }

    pub fn registration_disabled() -> Self {
        Self::new(
            ErrorKind::RegistrationDisabled,
            anyhow!("Register action is currently disabled"),
        )
    }

    pub fn configuration<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ConfigurationError, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    /// Store failure. The cause is kept for logging; the client sees a generic message.
    pub fn persistence<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::with_messages(
            ErrorKind::PersistenceError,
            err,
            vec!["Failed to save the request".to_string()],
        )
    }

    pub fn registration_failed<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::RegistrationFailed, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::with_messages(
            ErrorKind::Internal,
            err,
            vec!["Internal server error".to_string()],
        )
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind.as_str(), error = ?self.error, "request failed");
        }

        let body = ErrorResponse {
            error: self.messages.first().cloned().unwrap_or_default(),
            kind: self.kind,
            messages: self.messages,
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
