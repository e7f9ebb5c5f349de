//! # Rollgate Auth
//!
//! Credential tokens handed back after a successful self-registration.
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use rollgate_auth::{create_access_token, verify_token};
//! use rollgate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
