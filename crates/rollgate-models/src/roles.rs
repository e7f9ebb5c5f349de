//! Role models. Roles are seeded outside this service and only read here.

use crate::ids::RoleId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Stable type tag looked up by registration, e.g. `student`
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub role_type: String,
    pub description: Option<String>,
}

/// Role summary embedded in user responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleInfo {
    pub id: RoleId,
    pub name: String,
    #[serde(rename = "type")]
    pub role_type: String,
}

impl From<Role> for RoleInfo {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            role_type: role.role_type,
        }
    }
}
