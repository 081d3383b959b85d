//! Posting registry services.
//!
//! Implements [`PostingsQuery`] and [`PostingsCommand`] over a
//! [`PostingRepository`]. Field validation has already happened by the time
//! a [`NewPosting`] exists, so the registry trusts its inputs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    PostingRepository, PostingRepositoryError, PostingsCommand, PostingsQuery,
};
use crate::domain::{Error, NewPosting, Posting, PostingId, PostingWithRegistrations};

pub(crate) fn map_posting_error(error: PostingRepositoryError) -> Error {
    match error {
        PostingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("posting repository unavailable: {message}"))
        }
        PostingRepositoryError::Query { message } => {
            Error::internal(format!("posting repository error: {message}"))
        }
        // The owner was resolved from a live credential moments earlier, so a
        // missing row means the account vanished mid-request.
        PostingRepositoryError::OwnerNotFound { .. } => {
            Error::unauthorized("posting owner no longer exists")
        }
    }
}

/// Posting registry implementing both posting driving ports.
#[derive(Clone)]
pub struct PostingRegistryService<P> {
    postings: Arc<P>,
}

impl<P> PostingRegistryService<P> {
    /// Create a new registry over the given repository.
    pub fn new(postings: Arc<P>) -> Self {
        Self { postings }
    }
}

#[async_trait]
impl<P> PostingsQuery for PostingRegistryService<P>
where
    P: PostingRepository,
{
    async fn list_postings(&self) -> Result<Vec<Posting>, Error> {
        self.postings
            .list_newest_first()
            .await
            .map_err(map_posting_error)
    }

    async fn get_posting(&self, id: &PostingId) -> Result<Option<PostingWithRegistrations>, Error> {
        let Some(posting) = self
            .postings
            .find_by_id(id)
            .await
            .map_err(map_posting_error)?
        else {
            return Ok(None);
        };

        let registrations = self
            .postings
            .list_registrant_emails(id)
            .await
            .map_err(map_posting_error)?;

        Ok(Some(PostingWithRegistrations {
            posting,
            registrations,
        }))
    }
}

#[async_trait]
impl<P> PostingsCommand for PostingRegistryService<P>
where
    P: PostingRepository,
{
    async fn create_posting(&self, posting: NewPosting) -> Result<Posting, Error> {
        let created = self
            .postings
            .insert(&posting)
            .await
            .map_err(map_posting_error)?;
        info!(
            job_id = %created.id(),
            owner_id = %created.owner(),
            "posting created"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    //! Registry behaviour against a mocked repository.
    use super::*;
    use crate::domain::ports::MockPostingRepository;
    use crate::domain::{CompanyName, EmailAddress, ErrorCode, PostingTitle, UserId};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn new_posting(owner: UserId) -> NewPosting {
        NewPosting::new(
            PostingTitle::new("Rust Engineer").expect("title"),
            CompanyName::new("Ferrous").expect("company"),
            None,
            None,
            owner,
        )
    }

    fn service(repo: MockPostingRepository) -> PostingRegistryService<MockPostingRepository> {
        PostingRegistryService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn get_posting_returns_none_without_reading_registrants() {
        let mut repo = MockPostingRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_list_registrant_emails().never();

        let result = service(repo)
            .get_posting(&PostingId::random())
            .await
            .expect("lookup succeeds");
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn get_posting_joins_registrants_in_order() {
        let posting = Posting::new(new_posting(UserId::random()), Utc::now());
        let id = posting.id();
        let emails = vec![
            EmailAddress::new("first@x.com").expect("email"),
            EmailAddress::new("second@x.com").expect("email"),
        ];
        let expected = emails.clone();

        let mut repo = MockPostingRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .return_once(move |_| Ok(Some(posting)));
        repo.expect_list_registrant_emails()
            .with(eq(id))
            .return_once(move |_| Ok(emails));

        let detail = service(repo)
            .get_posting(&id)
            .await
            .expect("lookup succeeds")
            .expect("posting exists");
        assert_eq!(detail.registrations, expected);
        assert_eq!(detail.posting.id(), id);
    }

    #[rstest]
    #[tokio::test]
    async fn create_posting_returns_persisted_row() {
        let owner = UserId::random();
        let mut repo = MockPostingRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|new_posting| Ok(Posting::new(new_posting.clone(), Utc::now())));

        let created = service(repo)
            .create_posting(new_posting(owner.clone()))
            .await
            .expect("created");
        assert_eq!(created.owner(), &owner);
        assert_eq!(created.title().as_ref(), "Rust Engineer");
    }

    #[rstest]
    #[case(PostingRepositoryError::owner_not_found("u"), ErrorCode::Unauthorized)]
    #[case(PostingRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(PostingRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn create_posting_maps_repository_failures(
        #[case] failure: PostingRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockPostingRepository::new();
        repo.expect_insert().return_once(move |_| Err(failure));

        let err = service(repo)
            .create_posting(new_posting(UserId::random()))
            .await
            .expect_err("insert fails");
        assert_eq!(err.code(), expected);
    }
}
