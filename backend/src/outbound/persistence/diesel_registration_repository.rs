//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `(job_id, email)` and the posting reference are both left to
//! the table constraints; this adapter never reads before inserting.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{EmailAddress, PostingId, Registration, RegistrationId};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_failure, map_basic_pool_error,
};
use super::models::{NewRegistrationRow, RegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::registrations;

/// Diesel-backed registration ledger storage.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    map_basic_pool_error(error, RegistrationRepositoryError::connection)
}

fn map_diesel_error(
    error: diesel::result::Error,
    job_id: &PostingId,
    email: &EmailAddress,
) -> RegistrationRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => {
            RegistrationRepositoryError::duplicate(job_id.to_string(), email.as_ref())
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            RegistrationRepositoryError::posting_not_found(job_id.to_string())
        }
        other => map_basic_failure(
            other,
            RegistrationRepositoryError::query,
            RegistrationRepositoryError::connection,
        ),
    }
}

fn row_to_registration(row: RegistrationRow) -> Result<Registration, RegistrationRepositoryError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        RegistrationRepositoryError::query(format!("stored email invalid: {err}"))
    })?;
    Ok(Registration {
        id: RegistrationId::from_uuid(row.id),
        job_id: PostingId::from_uuid(row.job_id),
        email,
        created_at: row.created_at,
    })
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn insert(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRegistrationRow {
            id: *RegistrationId::random().as_uuid(),
            job_id: *job_id.as_uuid(),
            email: email.as_ref(),
        };

        let stored: RegistrationRow = diesel::insert_into(registrations::table)
            .values(&row)
            .returning(RegistrationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, job_id, email))?;

        row_to_registration(stored)
    }

    async fn delete(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            registrations::table
                .filter(registrations::job_id.eq(job_id.as_uuid()))
                .filter(registrations::email.eq(email.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, job_id, email))?;

        Ok(deleted > 0)
    }
}
