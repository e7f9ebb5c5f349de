//! User account models.
//!
//! [`User`] is the stored row and deliberately has no `Serialize` impl: the
//! only shape that leaves the service is [`SanitizedUser`].

use std::fmt;

use crate::ids::{RoleId, UserId};
use crate::roles::RoleInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Provider tag for accounts registered with a password on this service.
pub const LOCAL_PROVIDER: &str = "local";

#[derive(Clone, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub provider: String,
    pub role_id: RoleId,
    pub confirmed: bool,
    pub blocked: bool,
    /// SHA-256 of the pending confirmation token, if any
    pub confirmation_token: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("provider", &self.provider)
            .field("role_id", &self.role_id)
            .field("confirmed", &self.confirmed)
            .field("blocked", &self.blocked)
            .finish_non_exhaustive()
    }
}

/// Insert parameters for a new account. `password` is plaintext; the store hashes it.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub provider: String,
    pub role_id: RoleId,
    pub confirmed: bool,
    pub metadata: Value,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("provider", &self.provider)
            .field("role_id", &self.role_id)
            .field("confirmed", &self.confirmed)
            .finish()
    }
}

/// Public view of an account: everything except credentials and pending tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub provider: String,
    pub confirmed: bool,
    pub blocked: bool,
    pub role: RoleInfo,
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SanitizedUser {
    pub fn from_user(user: User, role: RoleInfo) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            provider: user.provider,
            confirmed: user.confirmed,
            blocked: user.blocked,
            role,
            metadata: user.metadata,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
