//! Registration and email-confirmation DTOs.

use std::fmt;

use crate::users::SanitizedUser;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Keys a client must never control. Removed before anything else reads the body.
pub const FORBIDDEN_REGISTRATION_FIELDS: [&str; 3] =
    ["confirmed", "confirmationToken", "resetPasswordToken"];

/// Keys the server assigns itself; client values are discarded.
const SERVER_ASSIGNED_FIELDS: [&str; 4] = ["id", "provider", "role", "blocked"];

/// Registration input after sanitizing.
///
/// Built from the raw JSON object with [`RegisterRequestDto::from_body`] so
/// that missing or mistyped fields surface as validation errors rather than
/// body rejections.
#[derive(Clone, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Roll number, used as the login username
    pub username: String,
    /// Remaining provider metadata, stored as-is
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
}

impl RegisterRequestDto {
    pub fn from_body(mut body: Map<String, Value>) -> Self {
        for key in FORBIDDEN_REGISTRATION_FIELDS
            .iter()
            .chain(SERVER_ASSIGNED_FIELDS.iter())
        {
            body.remove(*key);
        }

        let email = take_string(&mut body, "email");
        let password = take_string(&mut body, "password");
        let username = take_string(&mut body, "username");

        Self {
            email,
            password,
            username,
            metadata: body,
        }
    }
}

fn take_string(body: &mut Map<String, Value>, key: &str) -> String {
    match body.remove(key) {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl fmt::Debug for RegisterRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequestDto")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("metadata_keys", &self.metadata.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `{ credentialToken, user }`, or `{ user }` while email confirmation is pending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_token: Option<String>,
    pub user: SanitizedUser,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailConfirmationQuery {
    /// Token from the confirmation email
    pub confirmation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_body_strips_forbidden_fields() {
        let dto = RegisterRequestDto::from_body(body(json!({
            "email": "asha@nitp.ac.in",
            "password": "hunter22",
            "username": "2012345",
            "confirmed": true,
            "confirmationToken": "abc",
            "resetPasswordToken": "def",
            "provider": "github",
            "role": "admin",
            "hostel": "Brahmaputra"
        })));

        assert_eq!(dto.email, "asha@nitp.ac.in");
        assert_eq!(dto.username, "2012345");
        assert_eq!(dto.metadata.len(), 1);
        assert_eq!(dto.metadata["hostel"], "Brahmaputra");
    }

    #[test]
    fn test_from_body_missing_fields_fail_validation() {
        let dto = RegisterRequestDto::from_body(body(json!({ "username": 2012345 })));

        assert_eq!(dto.username, "2012345");
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let dto = RegisterRequestDto::from_body(body(json!({ "password": "topsecret" })));
        assert!(!format!("{:?}", dto).contains("topsecret"));
    }

    #[test]
    fn test_register_response_omits_missing_token() {
        let user: SanitizedUser = serde_json::from_value(json!({
            "id": "12345678-1234-1234-1234-123456789abc",
            "username": "2012345",
            "email": "asha@nitp.ac.in",
            "provider": "local",
            "confirmed": false,
            "blocked": false,
            "role": {
                "id": "12345678-1234-1234-1234-123456789abd",
                "name": "Student",
                "type": "student"
            },
            "metadata": {},
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let value = serde_json::to_value(RegisterResponse {
            credential_token: None,
            user,
        })
        .unwrap();
        assert!(value.get("credentialToken").is_none());
        assert_eq!(value["user"]["username"], "2012345");
    }
}
