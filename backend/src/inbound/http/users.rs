//! Identity handlers.
//!
//! ```text
//! POST /api/v1/auth/signup {"email":"ada@example.com","name":"Ada"}
//! POST /api/v1/auth/login  {"email":"ada@example.com"}
//! POST /api/v1/users       {"email":"ada@example.com"}
//! GET  /api/v1/users/me    (bearer credential)
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AuthSession, CreateUserRequest};
use crate::domain::{DisplayName, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_email, user_error};

/// Body for signup and explicit user creation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

impl TryFrom<SignupRequest> for CreateUserRequest {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let email = parse_email(value.email.as_deref().unwrap_or_default())?;
        let name = match value.name.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(DisplayName::new(raw).map_err(user_error)?),
        };
        Ok(Self { email, name })
    }
}

/// Body for `POST /api/v1/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// Credential plus the user it identifies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl From<AuthSession> for AuthResponse {
    fn from(value: AuthSession) -> Self {
        Self {
            token: value.token,
            expires_at: value.expires_at,
            user: value.user,
        }
    }
}

/// Create an account and return a credential for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let request = CreateUserRequest::try_from(payload.into_inner())?;
    let session = state.identity.signup(request).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Issue a credential for an existing account.
///
/// Identification is by email alone; there is no password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential issued", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No account for this email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let email = parse_email(payload.email.as_deref().unwrap_or_default())?;
    let session = state.identity.login(&email).await?;
    Ok(web::Json(AuthResponse::from(session)))
}

/// Create an account without issuing a credential.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let request = CreateUserRequest::try_from(payload.into_inner())?;
    let user = state.identity.create_user(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Return the user behind the presented credential.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(caller: AuthenticatedUser) -> web::Json<User> {
    web::Json(caller.into_inner())
}
