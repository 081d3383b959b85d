//! Registration ledger service.
//!
//! `add` checks that the posting exists, then inserts and lets the store's
//! `(job_id, email)` constraint decide duplicates. `remove` resolves the
//! posting, asks the [`AuthorizationGuard`], and only then deletes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::posting_service::map_posting_error;
use crate::domain::ports::{
    PostingRepository, RegistrationRepository, RegistrationRepositoryError, RegistrationsCommand,
};
use crate::domain::{
    AddRegistrationOutcome, AuthorizationGuard, EmailAddress, Error, PostingId,
    RemoveRegistrationOutcome, UserId,
};

fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("registration repository unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            Error::internal(format!("registration repository error: {message}"))
        }
        other @ (RegistrationRepositoryError::Duplicate { .. }
        | RegistrationRepositoryError::PostingNotFound { .. }) => {
            Error::internal(format!("unexpected registration outcome: {other}"))
        }
    }
}

/// Registration ledger implementing [`RegistrationsCommand`].
#[derive(Clone)]
pub struct RegistrationLedgerService<P, R, G> {
    postings: Arc<P>,
    registrations: Arc<R>,
    guard: Arc<G>,
}

impl<P, R, G> RegistrationLedgerService<P, R, G> {
    /// Create a ledger over the posting and registration stores.
    pub fn new(postings: Arc<P>, registrations: Arc<R>, guard: Arc<G>) -> Self {
        Self {
            postings,
            registrations,
            guard,
        }
    }
}

#[async_trait]
impl<P, R, G> RegistrationsCommand for RegistrationLedgerService<P, R, G>
where
    P: PostingRepository,
    R: RegistrationRepository,
    G: AuthorizationGuard,
{
    async fn add_registration(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<AddRegistrationOutcome, Error> {
        let exists = self
            .postings
            .find_by_id(job_id)
            .await
            .map_err(map_posting_error)?
            .is_some();
        if !exists {
            return Ok(AddRegistrationOutcome::JobNotFound);
        }

        match self.registrations.insert(job_id, email).await {
            Ok(registration) => {
                info!(%job_id, registration_id = %registration.id, "registration added");
                Ok(AddRegistrationOutcome::Added(registration))
            }
            Err(RegistrationRepositoryError::Duplicate { .. }) => {
                debug!(%job_id, "duplicate registration rejected");
                Ok(AddRegistrationOutcome::AlreadyRegistered)
            }
            // The posting was removed between the existence check and the insert.
            Err(RegistrationRepositoryError::PostingNotFound { .. }) => {
                Ok(AddRegistrationOutcome::JobNotFound)
            }
            Err(other) => Err(map_registration_error(other)),
        }
    }

    async fn remove_registration(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
        caller: &UserId,
    ) -> Result<RemoveRegistrationOutcome, Error> {
        let Some(posting) = self
            .postings
            .find_by_id(job_id)
            .await
            .map_err(map_posting_error)?
        else {
            return Ok(RemoveRegistrationOutcome::JobNotFound);
        };

        if self.guard.assert_owner(posting.owner(), caller).is_err() {
            warn!(%job_id, caller_id = %caller, "registration removal forbidden");
            return Ok(RemoveRegistrationOutcome::Forbidden);
        }

        let removed = self
            .registrations
            .delete(job_id, email)
            .await
            .map_err(map_registration_error)?;
        if removed {
            info!(%job_id, "registration removed");
            Ok(RemoveRegistrationOutcome::Removed)
        } else {
            Ok(RemoveRegistrationOutcome::RegistrationNotFound)
        }
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
