//! Student system-of-record models.

use std::fmt;

use crate::ids::StudentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: StudentId,
    pub roll: String,
    pub institutional_email: String,
    pub password_change_requested: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a password-change request. Both fields are required; they are
/// optional here so that a missing one is reported as invalid input.
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequestDto {
    #[serde(default)]
    pub institutional_email: Option<String>,
    #[serde(default)]
    pub roll: Option<String>,
}

impl fmt::Debug for PasswordChangeRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Identifiers of a not-yet-verified requester stay out of logs
        f.debug_struct("PasswordChangeRequestDto")
            .field("institutional_email", &self.institutional_email.is_some())
            .field("roll", &self.roll.is_some())
            .finish()
    }
}

/// New record for the admin CLI.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub roll: String,
    pub institutional_email: String,
}
