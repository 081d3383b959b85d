//! Port for issuing and verifying bearer credentials.
//!
//! Credentials carry only the user id and an expiry. Verification is a pure
//! function of the credential, the verification key, and the current time.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or verifying credentials.
    pub enum TokenError {
        /// The credential could not be decoded or its subject is not a user id.
        Malformed { message: String } => "malformed credential: {message}",
        /// The signature does not match the verification key.
        BadSignature => "credential signature mismatch",
        /// The credential is past its expiry.
        Expired => "credential expired",
        /// Signing failed while issuing a credential.
        Signing { message: String } => "failed to sign credential: {message}",
    }
}

/// A freshly issued credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies compact bearer credentials.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a credential for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, TokenError>;

    /// Verify a credential and return the user id it binds.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
