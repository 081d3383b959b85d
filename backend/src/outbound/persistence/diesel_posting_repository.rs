//! PostgreSQL-backed `PostingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostingRepository, PostingRepositoryError};
use crate::domain::{
    CompanyName, Description, EmailAddress, Location, NewPosting, Posting, PostingId,
    PostingTitle, UserId,
};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_failure, map_basic_pool_error,
};
use super::models::{JobRow, NewJobRow};
use super::pool::{DbPool, PoolError};
use super::schema::{jobs, registrations};

/// Diesel-backed posting registry storage.
#[derive(Clone)]
pub struct DieselPostingRepository {
    pool: DbPool,
}

impl DieselPostingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostingRepositoryError {
    map_basic_pool_error(error, PostingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostingRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        PostingRepositoryError::query,
        PostingRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, owner: &UserId) -> PostingRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::ForeignKeyViolation { .. } => {
            PostingRepositoryError::owner_not_found(owner.as_ref())
        }
        other => map_basic_failure(
            other,
            PostingRepositoryError::query,
            PostingRepositoryError::connection,
        ),
    }
}

fn invalid_row(field: &str, err: impl std::fmt::Display) -> PostingRepositoryError {
    PostingRepositoryError::query(format!("stored {field} invalid: {err}"))
}

/// Convert a database row to a domain posting.
fn row_to_posting(row: JobRow) -> Result<Posting, PostingRepositoryError> {
    let new_posting = NewPosting {
        id: PostingId::from_uuid(row.id),
        title: PostingTitle::new(&row.title).map_err(|err| invalid_row("title", err))?,
        company: CompanyName::new(&row.company).map_err(|err| invalid_row("company", err))?,
        location: Location::optional(row.location.as_deref())
            .map_err(|err| invalid_row("location", err))?,
        description: Description::optional(row.description.as_deref())
            .map_err(|err| invalid_row("description", err))?,
        owner: UserId::from_uuid(row.owner_user_id),
    };
    Ok(Posting::new(new_posting, row.created_at))
}

#[async_trait]
impl PostingRepository for DieselPostingRepository {
    async fn insert(&self, posting: &NewPosting) -> Result<Posting, PostingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewJobRow {
            id: *posting.id.as_uuid(),
            title: posting.title.as_ref(),
            company: posting.company.as_ref(),
            location: posting.location.as_ref().map(AsRef::as_ref),
            description: posting.description.as_ref().map(AsRef::as_ref),
            owner_user_id: *posting.owner.as_uuid(),
        };

        let stored: JobRow = diesel::insert_into(jobs::table)
            .values(&row)
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &posting.owner))?;

        row_to_posting(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Posting>, PostingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobRow> = jobs::table
            .select(JobRow::as_select())
            .order_by((jobs::created_at.desc(), jobs::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_posting).collect()
    }

    async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>, PostingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<JobRow> = jobs::table
            .filter(jobs::id.eq(id.as_uuid()))
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map(row_to_posting).transpose()
    }

    async fn list_registrant_emails(
        &self,
        id: &PostingId,
    ) -> Result<Vec<EmailAddress>, PostingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let emails: Vec<String> = registrations::table
            .filter(registrations::job_id.eq(id.as_uuid()))
            .select(registrations::email)
            .order_by((registrations::created_at.asc(), registrations::seq.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        emails
            .into_iter()
            .map(|email| EmailAddress::new(email).map_err(|err| invalid_row("email", err)))
            .collect()
    }
}
