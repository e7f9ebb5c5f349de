//! HS256 credential tokens signed with [`JwtConfig::secret`].

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use rollgate_config::JwtConfig;
use rollgate_core::AppError;

use crate::claims::Claims;

/// Issues a token for `user_id` that expires after `jwt_config.access_token_expiry` seconds.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now.saturating_add(jwt_config.access_token_expiry.max(0) as usize);

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Checks signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::internal_error(format!("Invalid or expired token: {}", e)))
}
