//! Driving port for publishing job postings.

use async_trait::async_trait;

use crate::domain::{Error, NewPosting, Posting};

/// Domain use-case port for posting writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostingsCommand: Send + Sync {
    /// Persist a posting owned by `posting.owner`.
    async fn create_posting(&self, posting: NewPosting) -> Result<Posting, Error>;
}
