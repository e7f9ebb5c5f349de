use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rollgate_auth::create_access_token;
use rollgate_config::{JwtConfig, RegistrationConfig};
use rollgate_core::{AppError, looks_already_hashed};
use rollgate_db::{RoleStore, StoreError, UserStore};
use rollgate_models::{
    LOCAL_PROVIDER, NewUser, RegisterRequestDto, RegisterResponse, SanitizedUser,
    validate_institutional_email, validate_roll_identifier,
};
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use super::confirmation::{ConfirmationSender, token_digest};
use crate::modules::roles::service::RoleService;

pub struct AuthService;

/// Where the client goes once an email confirmation link has been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Redirect(String),
    Confirmed,
}

impl AuthService {
    /// Self-registration of a student account.
    ///
    /// Gates run in a fixed order and the first failure wins: feature gate,
    /// body sanitizing, structural validation, credential shape, role
    /// resolution, institutional email, roll number, email conflicts. Nothing
    /// is written before every gate has passed.
    ///
    /// `now` drives the roll-number admission window.
    #[instrument(skip_all, fields(username = tracing::field::Empty))]
    pub async fn register(
        users: &dyn UserStore,
        roles: &dyn RoleStore,
        confirmations: &dyn ConfirmationSender,
        body: Map<String, Value>,
        config: &RegistrationConfig,
        jwt_config: &JwtConfig,
        now: DateTime<Utc>,
    ) -> Result<RegisterResponse, AppError> {
        if !config.allow_register {
            return Err(AppError::registration_disabled());
        }

        let mut dto = RegisterRequestDto::from_body(body);
        tracing::Span::current().record("username", dto.username.as_str());

        dto.validate().map_err(|e| AppError::from_validation(&e))?;

        if looks_already_hashed(&dto.password) {
            return Err(AppError::invalid_credential_format());
        }

        let role = RoleService::resolve_role(roles, &config.default_role).await?;

        if !validate_institutional_email(&dto.email, &config.institution_domain) {
            return Err(AppError::invalid_email());
        }
        dto.email = dto.email.to_lowercase();

        if !validate_roll_identifier(&dto.username, &now) {
            return Err(AppError::invalid_roll_identifier());
        }

        let existing = users.find_by_email(&dto.email).await.map_err(|e| {
            error!(error = %e, "email conflict lookup failed");
            AppError::registration_failed(anyhow!("An error occurred during account creation"))
        })?;
        if existing
            .iter()
            .any(|user| user.provider == LOCAL_PROVIDER || config.unique_email)
        {
            return Err(AppError::email_taken());
        }

        let new_user = NewUser {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            provider: LOCAL_PROVIDER.to_string(),
            role_id: role.id,
            confirmed: !config.email_confirmation,
            metadata: Value::Object(dto.metadata),
        };
        let user = users
            .create_user(new_user)
            .await
            .map_err(classify_create_error)?;
        info!(user_id = %user.id, "account registered");

        let sanitized = SanitizedUser::from_user(user.clone(), role.into());

        if config.email_confirmation {
            // The account stays persisted when dispatch fails
            confirmations.send_confirmation(&user).await.map_err(|e| {
                warn!(user_id = %user.id, error = %e, "confirmation email failed");
                AppError::registration_failed(e)
            })?;

            return Ok(RegisterResponse {
                credential_token: None,
                user: sanitized,
            });
        }

        let token = create_access_token(user.id.into_inner(), jwt_config)
            .map_err(|e| AppError::registration_failed(e.error))?;

        Ok(RegisterResponse {
            credential_token: Some(token),
            user: sanitized,
        })
    }

    /// Consumes a confirmation token and marks its account confirmed.
    ///
    /// A token works exactly once.
    #[instrument(skip_all)]
    pub async fn confirm_email(
        users: &dyn UserStore,
        token: Option<String>,
        config: &RegistrationConfig,
    ) -> Result<ConfirmationOutcome, AppError> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::invalid_input(["confirmation token is required"]))?;

        let user = users
            .confirm_by_token(&token_digest(&token))
            .await
            .map_err(AppError::persistence)?
            .ok_or_else(|| AppError::invalid_input(["Invalid confirmation token"]))?;
        info!(user_id = %user.id, "email confirmed");

        Ok(match &config.email_confirmation_redirect {
            Some(url) => ConfirmationOutcome::Redirect(url.clone()),
            None => ConfirmationOutcome::Confirmed,
        })
    }
}

fn classify_create_error(err: StoreError) -> AppError {
    if err.is_unique_violation_on("username") {
        return AppError::username_taken();
    }

    error!(error = %err, "account insert failed");
    AppError::registration_failed(anyhow!("An error occurred during account creation"))
}
