//! Ownership checks for owner-restricted mutations.
//!
//! The ledger consults an [`AuthorizationGuard`] rather than comparing ids
//! inline, so richer policies (roles, delegation) can be swapped in without
//! touching call sites.

use std::fmt;

use super::user::UserId;

/// The caller is not permitted to act on the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forbidden;

impl fmt::Display for Forbidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("caller does not own this resource")
    }
}

impl std::error::Error for Forbidden {}

/// Policy deciding whether a caller may act on an owned resource.
#[cfg_attr(test, mockall::automock)]
pub trait AuthorizationGuard: Send + Sync {
    /// Succeed when `caller` may act on a resource owned by `owner`.
    fn assert_owner(&self, owner: &UserId, caller: &UserId) -> Result<(), Forbidden>;
}

/// Only the owner may act.
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnerOnlyGuard;

impl AuthorizationGuard for OwnerOnlyGuard {
    fn assert_owner(&self, owner: &UserId, caller: &UserId) -> Result<(), Forbidden> {
        if owner == caller { Ok(()) } else { Err(Forbidden) }
    }
}
