//! Driving port for the registration ledger.

use async_trait::async_trait;

use crate::domain::{
    AddRegistrationOutcome, EmailAddress, Error, PostingId, RemoveRegistrationOutcome, UserId,
};

/// Domain use-case port for registration writes.
///
/// Expected conditions come back as outcome variants; `Err` is reserved for
/// storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationsCommand: Send + Sync {
    /// Register interest in a posting. No credential is required.
    async fn add_registration(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<AddRegistrationOutcome, Error>;

    /// Remove a registration on behalf of `caller`.
    async fn remove_registration(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
        caller: &UserId,
    ) -> Result<RemoveRegistrationOutcome, Error>;
}
