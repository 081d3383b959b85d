//! Port for the registration ledger.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PostingId, Registration};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration repository adapters.
    pub enum RegistrationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "registration repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "registration repository query failed: {message}",
        /// A registration for this posting and email already exists.
        Duplicate { job_id: String, email: String } =>
            "{email} is already registered for job {job_id}",
        /// The referenced posting does not exist.
        PostingNotFound { job_id: String } =>
            "job not found: {job_id}",
    }
}

/// Registration ledger storage.
///
/// The `(job_id, email)` pair is unique. Adapters must detect violations
/// atomically with the insert and report them as
/// [`RegistrationRepositoryError::Duplicate`], so that concurrent identical
/// inserts produce exactly one row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a registration with a fresh identifier.
    async fn insert(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<Registration, RegistrationRepositoryError>;

    /// Delete the matching registration. Returns `true` when a row was
    /// removed.
    async fn delete(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<bool, RegistrationRepositoryError>;
}
