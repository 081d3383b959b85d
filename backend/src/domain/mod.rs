//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities for the job board and the services
//! that enforce its invariants (email uniqueness, posting ownership,
//! per-posting registration uniqueness). Adapters live in `inbound` and
//! `outbound`; nothing here imports them.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - User, Posting, Registration — persisted aggregates.
//! - IdentityAccountService, PostingRegistryService, RegistrationLedgerService
//!   — driving port implementations.

pub mod authorization;
pub mod email;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod posting;
pub mod posting_service;
pub mod registration;
pub mod registration_service;
mod text;
pub mod trace_id;
pub mod user;

pub use self::authorization::{AuthorizationGuard, Forbidden, OwnerOnlyGuard};
pub use self::email::{EMAIL_MAX, EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity_service::IdentityAccountService;
pub use self::posting::{
    CompanyName, Description, Location, NewPosting, Posting, PostingField, PostingId,
    PostingTitle, PostingValidationError, PostingWithRegistrations,
};
pub use self::posting_service::PostingRegistryService;
pub use self::registration::{
    AddRegistrationOutcome, Registration, RegistrationId, RemoveRegistrationOutcome,
};
pub use self::registration_service::RegistrationLedgerService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, NewUser, User, UserId, UserRole, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jobboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
