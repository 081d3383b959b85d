//! Registration handlers.
//!
//! ```text
//! POST   /api/v1/jobs/{id}/registrations {"email":"a@example.com"}
//! DELETE /api/v1/jobs/{id}/registrations {"email":"a@example.com"}   (owner only)
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{AddRegistrationOutcome, Error, RemoveRegistrationOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_email, parse_posting_id};

/// Body shared by both registration endpoints.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[schema(example = "a@example.com")]
    pub email: Option<String>,
}

/// Acknowledgement returned on success.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    const OK: Self = Self { success: true };
}

fn job_not_found() -> Error {
    Error::not_found("job not found")
}

/// Register an email's interest in a posting. No credential is required.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/registrations",
    params(("id" = String, Path, description = "Posting identifier (UUID)")),
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = Acknowledgement),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Posting not found", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "addRegistration",
    security([])
)]
#[post("/jobs/{id}/registrations")]
pub async fn add_registration(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_posting_id(&path.into_inner(), ID_FIELD)?;
    let email = parse_email(payload.email.as_deref().unwrap_or_default())?;

    match state.registrations.add_registration(&job_id, &email).await? {
        AddRegistrationOutcome::Added(_) => Ok(HttpResponse::Created().json(Acknowledgement::OK)),
        AddRegistrationOutcome::JobNotFound => Err(job_not_found()),
        AddRegistrationOutcome::AlreadyRegistered => {
            Err(Error::conflict("email already registered for this job")
                .with_details(json!({ "field": "email", "code": "duplicate_registration" })))
        }
    }
}

/// Remove a registration. Only the posting's owner may do this.
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}/registrations",
    params(("id" = String, Path, description = "Posting identifier (UUID)")),
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registration removed", body = Acknowledgement),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 403, description = "Caller does not own the posting", body = Error),
        (status = 404, description = "Posting or registration not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "removeRegistration"
)]
#[delete("/jobs/{id}/registrations")]
pub async fn remove_registration(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    caller: AuthenticatedUser,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_posting_id(&path.into_inner(), ID_FIELD)?;
    let email = parse_email(payload.email.as_deref().unwrap_or_default())?;

    match state
        .registrations
        .remove_registration(&job_id, &email, caller.user().id())
        .await?
    {
        RemoveRegistrationOutcome::Removed => Ok(HttpResponse::Ok().json(Acknowledgement::OK)),
        RemoveRegistrationOutcome::JobNotFound => Err(job_not_found()),
        RemoveRegistrationOutcome::Forbidden => Err(Error::forbidden(
            "only the job owner can remove registrations",
        )),
        RemoveRegistrationOutcome::RegistrationNotFound => {
            Err(Error::not_found("registration not found"))
        }
    }
}

#[cfg(test)]
mod tests;
