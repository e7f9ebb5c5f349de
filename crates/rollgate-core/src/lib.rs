//! # Rollgate Core
//!
//! Core types, errors, and utilities for the Rollgate API.
//!
//! - [`errors`]: Application error taxonomy with HTTP response conversion
//! - [`password`]: Password hashing, verification, and pre-hashed secret detection
//!
//! # Example
//!
//! ```ignore
//! use rollgate_core::errors::AppError;
//! use rollgate_core::password::{hash_password, looks_already_hashed};
//!
//! if looks_already_hashed(&dto.password) {
//!     return Err(AppError::invalid_credential_format());
//! }
//! let hash = hash_password(&dto.password)?;
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{hash_password, hash_password_with_cost, looks_already_hashed, verify_password};
