//! In-process store backends.
//!
//! They enforce the same uniqueness rules as the SQL schema (`username`
//! unique, `email` unique among `local` accounts) and report violations with
//! the same constraint names, so services behave identically on both.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use rollgate_core::hash_password_with_cost;
use rollgate_models::{
    LOCAL_PROVIDER, NewUser, Role, RoleId, Student, StudentId, User, UserId,
};

use crate::stores::{RoleStore, StoreError, StudentStore, UserStore};

/// bcrypt's minimum cost; hashing speed is irrelevant for in-memory data.
const MEMORY_BCRYPT_COST: u32 = 4;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a backend error.
    pub fn fail_writes(&self) {
        *lock(&self.fail_writes) = true;
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        lock(&self.users)
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if *lock(&self.fail_writes) {
            return Err(StoreError::Backend(
                "connection reset by peer (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        Ok(lock(&self.users)
            .iter()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.check_writable()?;
        let hashed = hash_password_with_cost(&new_user.password, MEMORY_BCRYPT_COST)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(StoreError::UniqueViolation {
                constraint: "users_username_key".to_string(),
            });
        }
        if new_user.provider == LOCAL_PROVIDER
            && users
                .iter()
                .any(|u| u.provider == LOCAL_PROVIDER && u.email == new_user.email)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "users_local_email_key".to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: new_user.username,
            email: new_user.email,
            password: hashed,
            provider: new_user.provider,
            role_id: new_user.role_id,
            confirmed: new_user.confirmed,
            blocked: false,
            confirmation_token: None,
            metadata: new_user.metadata,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn set_confirmation_token(
        &self,
        id: UserId,
        token_digest: &str,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut users = lock(&self.users);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.confirmation_token = Some(token_digest.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn confirm_by_token(&self, token_digest: &str) -> Result<Option<User>, StoreError> {
        self.check_writable()?;
        let mut users = lock(&self.users);
        let Some(user) = users
            .iter_mut()
            .find(|u| u.confirmation_token.as_deref() == Some(token_digest))
        else {
            return Ok(None);
        };

        user.confirmed = true;
        user.confirmation_token = None;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MemoryRoleStore {
    roles: Arc<Mutex<Vec<Role>>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one role of the given type.
    pub fn with_role(role_type: &str) -> Self {
        let store = Self::new();
        store.insert(Role {
            id: RoleId::new(),
            name: capitalize(role_type),
            role_type: role_type.to_string(),
            description: None,
        });
        store
    }

    pub fn insert(&self, role: Role) {
        lock(&self.roles).push(role);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_by_type(&self, role_type: &str) -> Result<Option<Role>, StoreError> {
        Ok(lock(&self.roles)
            .iter()
            .find(|r| r.role_type == role_type)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStudentStore {
    students: Arc<Mutex<Vec<Student>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, roll: &str, institutional_email: &str) -> StudentId {
        let now = Utc::now();
        let id = StudentId::new();
        lock(&self.students).push(Student {
            id,
            roll: roll.to_string(),
            institutional_email: institutional_email.to_lowercase(),
            password_change_requested: false,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn get(&self, id: StudentId) -> Option<Student> {
        lock(&self.students).iter().find(|s| s.id == id).cloned()
    }

    /// Makes every subsequent write fail with a backend error.
    pub fn fail_writes(&self) {
        *lock(&self.fail_writes) = true;
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find_by_roll_and_email(
        &self,
        roll: &str,
        institutional_email: &str,
    ) -> Result<Option<Student>, StoreError> {
        Ok(lock(&self.students)
            .iter()
            .find(|s| {
                s.roll == roll && s.institutional_email.eq_ignore_ascii_case(institutional_email)
            })
            .cloned())
    }

    async fn mark_password_change_requested(&self, id: StudentId) -> Result<(), StoreError> {
        if *lock(&self.fail_writes) {
            return Err(StoreError::Backend(
                "connection reset by peer (simulated)".to_string(),
            ));
        }

        let mut students = lock(&self.students);
        let student = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound)?;
        student.password_change_requested = true;
        student.updated_at = Utc::now();
        Ok(())
    }
}
