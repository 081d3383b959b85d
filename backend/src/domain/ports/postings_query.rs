//! Driving port for reading job postings.

use async_trait::async_trait;

use crate::domain::{Error, Posting, PostingId, PostingWithRegistrations};

/// Domain use-case port for posting reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostingsQuery: Send + Sync {
    /// All postings, newest first, without registrant data.
    async fn list_postings(&self) -> Result<Vec<Posting>, Error>;

    /// One posting with its registrant emails, or `None` when absent.
    async fn get_posting(&self, id: &PostingId) -> Result<Option<PostingWithRegistrations>, Error>;
}
