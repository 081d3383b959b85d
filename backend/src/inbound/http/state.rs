//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IdentityService, PostingsCommand, PostingsQuery, RegistrationsCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityService>,
    pub postings: Arc<dyn PostingsQuery>,
    pub postings_command: Arc<dyn PostingsCommand>,
    pub registrations: Arc<dyn RegistrationsCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jobboard::domain::{
    ///     IdentityAccountService, OwnerOnlyGuard, PostingRegistryService,
    ///     RegistrationLedgerService,
    /// };
    /// use jobboard::inbound::http::state::HttpState;
    /// use jobboard::outbound::memory::InMemoryStore;
    /// use jobboard::outbound::token::{JwtTokenService, TokenKey, TokenSettings};
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let settings = TokenSettings {
    ///     key: TokenKey::generate(),
    ///     ttl: std::time::Duration::from_secs(3600),
    ///     ephemeral: true,
    /// };
    /// let tokens = Arc::new(JwtTokenService::new(&settings).expect("token service"));
    /// let postings = Arc::new(PostingRegistryService::new(store.clone()));
    /// let state = HttpState::new(
    ///     Arc::new(IdentityAccountService::new(store.clone(), tokens)),
    ///     postings.clone(),
    ///     postings,
    ///     Arc::new(RegistrationLedgerService::new(
    ///         store.clone(),
    ///         store,
    ///         Arc::new(OwnerOnlyGuard),
    ///     )),
    /// );
    /// let _identity = state.identity.clone();
    /// ```
    pub fn new(
        identity: Arc<dyn IdentityService>,
        postings: Arc<dyn PostingsQuery>,
        postings_command: Arc<dyn PostingsCommand>,
        registrations: Arc<dyn RegistrationsCommand>,
    ) -> Self {
        Self {
            identity,
            postings,
            postings_command,
            registrations,
        }
    }
}
