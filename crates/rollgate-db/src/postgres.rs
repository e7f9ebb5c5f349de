//! PostgreSQL store backends.

use async_trait::async_trait;
use rollgate_core::hash_password;
use rollgate_models::{NewStudent, NewUser, Role, RoleId, Student, StudentId, User, UserId};
use sqlx::PgPool;
use tracing::instrument;

use crate::stores::{RoleStore, StoreError, StudentStore, UserStore};

const USER_COLUMNS: &str = "id, username, email, password, provider, role_id, confirmed, blocked, \
     confirmation_token, metadata, created_at, updated_at";

const STUDENT_COLUMNS: &str =
    "id, roll, institutional_email, password_change_requested, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let plaintext = new_user.password.clone();
        let hashed_password = tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| StoreError::Backend(format!("hashing task failed: {}", e)))?
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let sql = format!(
            "INSERT INTO users (username, email, password, provider, role_id, confirmed, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&hashed_password)
            .bind(&new_user.provider)
            .bind(new_user.role_id)
            .bind(new_user.confirmed)
            .bind(&new_user.metadata)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, token_digest))]
    async fn set_confirmation_token(
        &self,
        id: UserId,
        token_digest: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET confirmation_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token_digest)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, token_digest))]
    async fn confirm_by_token(&self, token_digest: &str) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "UPDATE users
             SET confirmed = TRUE, confirmation_token = NULL, updated_at = NOW()
             WHERE confirmation_token = $1
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(token_digest)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[derive(Clone, Debug)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the role if no role with this type exists yet. Used by the admin CLI.
    #[instrument(skip(self))]
    pub async fn ensure_role(
        &self,
        name: &str,
        role_type: &str,
        description: Option<&str>,
    ) -> Result<Role, StoreError> {
        if let Some(existing) = self.find_by_type(role_type).await? {
            return Ok(existing);
        }

        let role = sqlx::query_as::<_, Role>(
            "INSERT INTO roles (id, name, type, description)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (type) DO UPDATE SET name = roles.name
             RETURNING id, name, type, description",
        )
        .bind(RoleId::new())
        .bind(name)
        .bind(role_type)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    #[instrument(skip(self))]
    async fn find_by_type(&self, role_type: &str) -> Result<Option<Role>, StoreError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, type, description FROM roles WHERE type = $1 LIMIT 1",
        )
        .bind(role_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }
}

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds a record to the system-of-record. Used by the admin CLI.
    #[instrument(skip(self))]
    pub async fn insert(&self, student: &NewStudent) -> Result<Student, StoreError> {
        let sql = format!(
            "INSERT INTO students (roll, institutional_email)
             VALUES ($1, $2)
             RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.roll)
            .bind(student.institutional_email.to_lowercase())
            .fetch_one(&self.pool)
            .await?;

        Ok(student)
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    #[instrument(skip_all)]
    async fn find_by_roll_and_email(
        &self,
        roll: &str,
        institutional_email: &str,
    ) -> Result<Option<Student>, StoreError> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE roll = $1 AND lower(institutional_email) = lower($2)"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(roll)
            .bind(institutional_email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn mark_password_change_requested(&self, id: StudentId) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE students
             SET password_change_requested = TRUE, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
