//! # Rollgate Models
//!
//! Domain models, DTOs, and format validators for the Rollgate API.
//!
//! # Modules
//!
//! - [`auth`]: Registration request/response and email confirmation DTOs
//! - [`ids`]: Strongly-typed entity IDs
//! - [`roles`]: Role records
//! - [`students`]: Student system-of-record and password-change requests
//! - [`users`]: User accounts and their public view
//! - [`validation`]: Institutional email and roll-number validators

pub mod auth;
pub mod ids;
pub mod roles;
pub mod students;
pub mod users;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    EmailConfirmationQuery, FORBIDDEN_REGISTRATION_FIELDS, MessageResponse, RegisterRequestDto,
    RegisterResponse,
};
pub use ids::{RoleId, StudentId, UserId};
pub use roles::{Role, RoleInfo};
pub use students::{NewStudent, PasswordChangeRequestDto, Student};
pub use users::{LOCAL_PROVIDER, NewUser, SanitizedUser, User};
pub use validation::{RollWindow, validate_institutional_email, validate_roll_identifier};
