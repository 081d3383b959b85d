//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use jobboard::domain::ports::{PostingRepository, RegistrationRepository, UserRepository};
use jobboard::domain::{
    IdentityAccountService, OwnerOnlyGuard, PostingRegistryService, RegistrationLedgerService,
};
use jobboard::inbound::http::state::HttpState;
use jobboard::outbound::memory::InMemoryStore;
use jobboard::outbound::persistence::{
    DieselPostingRepository, DieselRegistrationRepository, DieselUserRepository,
};
use jobboard::outbound::token::JwtTokenService;
use tracing::warn;

use super::ServerConfig;

/// Assemble the domain services over one set of repositories.
fn assemble<U, P, R>(
    users: Arc<U>,
    postings: Arc<P>,
    registrations: Arc<R>,
    tokens: Arc<JwtTokenService>,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostingRepository + 'static,
    R: RegistrationRepository + 'static,
{
    let registry = Arc::new(PostingRegistryService::new(postings.clone()));
    HttpState::new(
        Arc::new(IdentityAccountService::new(users, tokens)),
        registry.clone(),
        registry,
        Arc::new(RegistrationLedgerService::new(
            postings,
            registrations,
            Arc::new(OwnerOnlyGuard),
        )),
    )
}

/// Build the HTTP state, using Diesel adapters when a pool is configured and
/// the in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let tokens = Arc::new(
        JwtTokenService::new(&config.tokens)
            .map_err(|err| std::io::Error::other(format!("token service: {err}")))?,
    );

    let state = match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostingRepository::new(pool.clone())),
            Arc::new(DieselRegistrationRepository::new(pool.clone())),
            tokens,
        ),
        None => {
            warn!("no database configured; state is kept in memory and lost on restart");
            let store = Arc::new(InMemoryStore::new());
            assemble(store.clone(), store.clone(), store, tokens)
        }
    };
    Ok(state)
}
