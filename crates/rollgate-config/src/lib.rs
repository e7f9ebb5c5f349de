//! # Rollgate Config
//!
//! Configuration types for the Rollgate API, loaded from environment variables.
//!
//! - [`registration`]: Self-registration policy (feature gate, email rules, fixed role)
//! - [`jwt`]: Credential token signing configuration
//! - [`email`]: Email/SMTP configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! Services never read the environment themselves; each call receives the
//! config value it needs so tests can pass fixture configurations.
//!
//! # Example
//!
//! ```ignore
//! use rollgate_config::{JwtConfig, RegistrationConfig};
//!
//! let registration = RegistrationConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod registration;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use registration::RegistrationConfig;

/// Interprets an optional env value as a boolean flag.
///
/// `true`/`1`/`yes`/`on` (any case) enable, anything else present disables,
/// absent falls back to `default`.
pub(crate) fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        None => default,
    }
}
