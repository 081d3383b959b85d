//! Port for job posting persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewPosting, Posting, PostingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by posting repository adapters.
    pub enum PostingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "posting repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "posting repository query failed: {message}",
        /// The owning user does not exist.
        OwnerNotFound { owner_id: String } =>
            "posting owner not found: {owner_id}",
    }
}

/// Posting registry storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostingRepository: Send + Sync {
    /// Persist a posting. The owner reference is a hard foreign key.
    async fn insert(&self, posting: &NewPosting) -> Result<Posting, PostingRepositoryError>;

    /// All postings, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Posting>, PostingRepositoryError>;

    /// Fetch a posting by identifier.
    async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>, PostingRepositoryError>;

    /// Registrant emails for a posting in ascending registration order.
    ///
    /// Returns an empty list for unknown postings; callers check existence
    /// first.
    async fn list_registrant_emails(
        &self,
        id: &PostingId,
    ) -> Result<Vec<EmailAddress>, PostingRepositoryError>;
}
