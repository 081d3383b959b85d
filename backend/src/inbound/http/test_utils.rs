//! Test helpers for inbound HTTP components.
//!
//! Handlers run against the real services over an [`InMemoryStore`], so
//! tests exercise the whole request path without a database.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{AuthSession, CreateUserRequest, IdentityService};
use crate::domain::{
    EmailAddress, IdentityAccountService, OwnerOnlyGuard, PostingRegistryService,
    RegistrationLedgerService,
};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::token::{JwtTokenService, TokenKey, TokenSettings};

use super::configure_api;
use super::state::HttpState;

pub(crate) struct TestBackend {
    pub(crate) state: web::Data<HttpState>,
}

impl TestBackend {
    /// Sign a user up through the identity port and return the session.
    pub(crate) async fn signup(&self, email: &str) -> AuthSession {
        self.state
            .identity
            .signup(CreateUserRequest {
                email: EmailAddress::new(email).expect("valid email"),
                name: None,
            })
            .await
            .expect("signup succeeds")
    }
}

pub(crate) fn test_backend() -> TestBackend {
    let store = Arc::new(InMemoryStore::new());
    let settings = TokenSettings {
        key: TokenKey::generate(),
        ttl: Duration::from_secs(3600),
        ephemeral: true,
    };
    let tokens = Arc::new(JwtTokenService::new(&settings).expect("token service"));
    let postings = Arc::new(PostingRegistryService::new(store.clone()));
    let state = HttpState::new(
        Arc::new(IdentityAccountService::new(store.clone(), tokens)),
        postings.clone(),
        postings,
        Arc::new(RegistrationLedgerService::new(
            store.clone(),
            store,
            Arc::new(OwnerOnlyGuard),
        )),
    );
    TestBackend {
        state: web::Data::new(state),
    }
}

pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

pub(crate) fn bearer(session: &AuthSession) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", session.token))
}
