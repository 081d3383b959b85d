//! Email registrations against a posting.
//!
//! A registration references a posting and a free-form email only; it is
//! never tied to a user account. The pair `(job_id, email)` is unique.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::email::EmailAddress;
use super::posting::PostingId;

/// Stable registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub job_id: PostingId,
    #[schema(value_type = String, example = "someone@example.com")]
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Result of adding a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRegistrationOutcome {
    Added(Registration),
    JobNotFound,
    /// The email already holds a registration for this posting.
    AlreadyRegistered,
}

/// Result of removing a registration.
///
/// Variants are listed in precedence order: a missing posting is reported
/// before an authorization failure, which is reported before a missing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveRegistrationOutcome {
    Removed,
    JobNotFound,
    Forbidden,
    RegistrationNotFound,
}
