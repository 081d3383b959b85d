//! Job posting handlers.
//!
//! ```text
//! GET  /api/v1/jobs
//! GET  /api/v1/jobs/{id}
//! POST /api/v1/jobs {"title":"Backend Engineer","company":"Acme Ltd"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CompanyName, Description, Error, Location, NewPosting, Posting, PostingTitle,
    PostingValidationError, PostingWithRegistrations,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID_FIELD, parse_posting_id, posting_error};

/// Body for `POST /api/v1/jobs`.
///
/// Fields are optional at the JSON level so a missing title reports the same
/// `required` detail as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[schema(example = "Backend Engineer")]
    pub title: Option<String>,
    #[schema(example = "Acme Ltd")]
    pub company: Option<String>,
    #[schema(example = "Remote")]
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CreateJobRequest {
    fn into_new_posting(
        self,
        owner: &AuthenticatedUser,
    ) -> Result<NewPosting, PostingValidationError> {
        let title = PostingTitle::new(self.title.unwrap_or_default())?;
        let company = CompanyName::new(self.company.unwrap_or_default())?;
        let location = Location::optional(self.location.as_deref())?;
        let description = Description::optional(self.description.as_deref())?;
        Ok(NewPosting::new(
            title,
            company,
            location,
            description,
            owner.user().id().clone(),
        ))
    }
}

/// List every posting, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "Postings, newest first", body = [Posting]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Posting>>> {
    let postings = state.postings.list_postings().await?;
    Ok(web::Json(postings))
}

/// Fetch one posting together with its registrant emails.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Posting identifier (UUID)")),
    responses(
        (status = 200, description = "Posting with registrations", body = PostingWithRegistrations),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Posting not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security([])
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostingWithRegistrations>> {
    let id = parse_posting_id(&path.into_inner(), ID_FIELD)?;
    state
        .postings
        .get_posting(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("job not found"))
}

/// Create a posting owned by the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Posting created", body = Posting),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateJobRequest>,
) -> ApiResult<HttpResponse> {
    let new_posting = payload
        .into_inner()
        .into_new_posting(&caller)
        .map_err(posting_error)?;
    let posting = state.postings_command.create_posting(new_posting).await?;
    Ok(HttpResponse::Created().json(posting))
}
