//! # Rollgate DB
//!
//! Database pool and persistence backends for the Rollgate API.
//!
//! Services depend only on the store traits in [`stores`]. [`postgres`]
//! implements them over SQLx; [`memory`] (feature `memory`) keeps everything
//! in process for tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rollgate_db::{init_db_pool, postgres::PgUserStore, stores::UserStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
//! ```

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;
pub mod stores;

pub use stores::{RoleStore, StoreError, StudentStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
///
/// The pool is cheaply cloneable; build it once at startup and hand clones to
/// the store backends.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
