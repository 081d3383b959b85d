//! Driving port for account creation and credential handling.
//!
//! Inbound adapters call this port to sign users up, log them in, and
//! resolve bearer credentials into live user records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DisplayName, EmailAddress, Error, User};

/// Validated input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: EmailAddress,
    pub name: Option<DisplayName>,
}

/// A credential together with the user it identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Domain use-case port for identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a user without issuing a credential.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Create a user and issue a credential for it.
    async fn signup(&self, request: CreateUserRequest) -> Result<AuthSession, Error>;

    /// Issue a credential for an existing user.
    async fn login(&self, email: &EmailAddress) -> Result<AuthSession, Error>;

    /// Verify a credential and load the user it names.
    ///
    /// The user record is always re-read; a credential whose user no longer
    /// exists is rejected as unauthorised.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
}
