//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Constraint violations surface as typed port variants:
//!
//! - `users_email_key` → `UserPersistenceError::DuplicateEmail`
//! - `jobs.owner_user_id` FK → `PostingRepositoryError::OwnerNotFound`
//! - `registrations_job_id_email_key` → `RegistrationRepositoryError::Duplicate`
//! - `registrations.job_id` FK → `RegistrationRepositoryError::PostingNotFound`
//!
//! # Example
//!
//! ```no_run
//! use jobboard::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), jobboard::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jobboard")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_posting_repository;
mod diesel_registration_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_posting_repository::DieselPostingRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async,
};
pub use pool::{DbPool, PoolConfig, PoolError};
