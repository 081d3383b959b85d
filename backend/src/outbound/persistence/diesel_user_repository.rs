//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, NewUser, User, UserId};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_failure, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed identity store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => UserPersistenceError::duplicate_email(email.as_ref()),
        other => map_basic_failure(
            other,
            UserPersistenceError::query,
            UserPersistenceError::connection,
        ),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_failure(
        classify_diesel_error(error),
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row to a domain user.
///
/// Stored values were validated on the way in, so a failure here means the
/// table was edited out of band.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    let name = row
        .name
        .as_deref()
        .map(DisplayName::new)
        .transpose()
        .map_err(|err| UserPersistenceError::query(format!("stored name invalid: {err}")))?;
    let role = row
        .role
        .parse()
        .map_err(|err| UserPersistenceError::query(format!("stored role invalid: {err}")))?;
    let new_user = NewUser {
        id: UserId::from_uuid(row.id),
        email,
        name,
        role,
    };
    Ok(User::new(new_user, row.created_at))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id.as_uuid(),
            email: user.email.as_ref(),
            name: user.name.as_ref().map(AsRef::as_ref),
            role: user.role.as_str(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &user.email))?;

        row_to_user(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        result.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        result.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; query behaviour needs a live database.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(role: &str, name: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            name: name.map(str::to_owned),
            role: role.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn converts_valid_rows() {
        let user = row_to_user(row("admin", Some("Ada"))).expect("valid row");
        assert_eq!(user.role(), crate::domain::UserRole::Admin);
        assert_eq!(user.name().map(AsRef::as_ref), Some("Ada"));
    }

    #[rstest]
    fn unknown_roles_are_query_errors() {
        let err = row_to_user(row("owner", None)).expect_err("bad role");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
