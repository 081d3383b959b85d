//! Identity domain service.
//!
//! Combines the user repository with the token service to implement the
//! [`IdentityService`] driving port. Email uniqueness is left to the
//! repository's insert; there is no lookup before creating a user.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AuthSession, CreateUserRequest, IdentityService, TokenError, TokenService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Error, NewUser, User};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict("a user with this email already exists").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
            }))
        }
    }
}

/// Identity service backed by a user repository and a token signer.
#[derive(Clone)]
pub struct IdentityAccountService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> IdentityAccountService<U, T> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> IdentityAccountService<U, T>
where
    U: UserRepository,
    T: TokenService,
{
    fn issue_session(&self, user: User) -> Result<AuthSession, Error> {
        let issued = self
            .tokens
            .issue(user.id())
            .map_err(|err| Error::internal(format!("failed to issue credential: {err}")))?;
        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}

#[async_trait]
impl<U, T> IdentityService for IdentityAccountService<U, T>
where
    U: UserRepository,
    T: TokenService,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let new_user = NewUser::member(request.email, request.name);
        let user = self.users.insert(&new_user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn signup(&self, request: CreateUserRequest) -> Result<AuthSession, Error> {
        let user = self.create_user(request).await?;
        self.issue_session(user)
    }

    async fn login(&self, email: &EmailAddress) -> Result<AuthSession, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        self.issue_session(user)
    }

    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "credential rejected");
            match err {
                TokenError::Expired => Error::unauthorized("token expired"),
                _ => Error::unauthorized("invalid token"),
            }
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(user_id = %user_id, "credential names an unknown user");
                Error::unauthorized("invalid token")
            })
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
