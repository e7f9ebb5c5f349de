//! Store traits the services depend on.
//!
//! Each store owns its own concurrency control. Uniqueness constraints are
//! enforced by the backend and reported as [`StoreError::UniqueViolation`]
//! with the violated constraint name, which callers use to classify races the
//! service-level pre-checks cannot see.

use async_trait::async_trait;
use rollgate_models::{NewUser, Role, Student, StudentId, User, UserId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    #[error("not found")]
    NotFound,
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True when this is a uniqueness violation on a constraint naming `field`.
    pub fn is_unique_violation_on(&self, field: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint } if constraint.contains(field))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                }
            }
            other => Self::Backend(other.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All accounts with this (already normalized) email, across providers.
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError>;

    /// Hashes `new_user.password` and inserts the account.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Stores the digest of a pending confirmation token.
    async fn set_confirmation_token(&self, id: UserId, token_digest: &str)
    -> Result<(), StoreError>;

    /// Marks the account holding `token_digest` confirmed and clears the token,
    /// atomically. Returns `None` when no account holds it.
    async fn confirm_by_token(&self, token_digest: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_type(&self, role_type: &str) -> Result<Option<Role>, StoreError>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Both fields must match the same record. The email comparison ignores case.
    async fn find_by_roll_and_email(
        &self,
        roll: &str,
        institutional_email: &str,
    ) -> Result<Option<Student>, StoreError>;

    async fn mark_password_change_requested(&self, id: StudentId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_on_field() {
        let err = StoreError::UniqueViolation {
            constraint: "users_username_key".to_string(),
        };
        assert!(err.is_unique_violation_on("username"));
        assert!(!err.is_unique_violation_on("email"));
    }

    #[test]
    fn test_backend_error_never_counts_as_unique() {
        let err = StoreError::Backend("value too long for column username".to_string());
        assert!(!err.is_unique_violation_on("username"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }
}
