//! # Rollgate CLI
//!
//! Administration and seeding utilities for Rollgate.
//!
//! Registration needs its fixed role to exist, and password change requests
//! are matched against the student records; both are provisioned from here.
//!
//! ## Usage
//!
//! ```ignore
//! use rollgate_cli::seeder::{seed_roles, seed_students};
//!
//! seed_roles(&pool).await?;
//! seed_students(&pool, 100, "nitp.ac.in", chrono::Utc::now()).await?;
//! ```

pub mod seeder;
