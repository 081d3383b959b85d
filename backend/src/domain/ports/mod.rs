//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, token signing) are implemented by outbound
//! adapters. Driving ports are implemented by domain services and consumed by
//! inbound adapters. Every driven port exposes a typed error enum so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_service;
mod posting_repository;
mod postings_command;
mod postings_query;
mod registration_repository;
mod registrations_command;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use identity_service::MockIdentityService;
pub use identity_service::{AuthSession, CreateUserRequest, IdentityService};
#[cfg(test)]
pub use posting_repository::MockPostingRepository;
pub use posting_repository::{PostingRepository, PostingRepositoryError};
#[cfg(test)]
pub use postings_command::MockPostingsCommand;
pub use postings_command::PostingsCommand;
#[cfg(test)]
pub use postings_query::MockPostingsQuery;
pub use postings_query::PostingsQuery;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
#[cfg(test)]
pub use registrations_command::MockRegistrationsCommand;
pub use registrations_command::RegistrationsCommand;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
