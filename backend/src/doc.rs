//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every `/api/v1` handler and the health probes. Swagger
//! UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Posting, PostingWithRegistrations, User, UserRole};
use crate::inbound::http::jobs::CreateJobRequest;
use crate::inbound::http::registrations::{Acknowledgement, RegistrationRequest};
use crate::inbound::http::users::{AuthResponse, LoginRequest, SignupRequest};

/// Register the bearer credential security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Credential issued by POST /api/v1/auth/signup or /login."))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Job board API",
        description = "Job postings, interest registrations, and owner-restricted management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::registrations::add_registration,
        crate::inbound::http::registrations::remove_registration,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserRole,
        Posting,
        PostingWithRegistrations,
        CreateJobRequest,
        RegistrationRequest,
        Acknowledgement,
        SignupRequest,
        LoginRequest,
        AuthResponse,
    )),
    tags(
        (name = "jobs", description = "Job postings"),
        (name = "registrations", description = "Interest registrations on postings"),
        (name = "auth", description = "Signup and login"),
        (name = "users", description = "User accounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
