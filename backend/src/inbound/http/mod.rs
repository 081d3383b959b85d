//! HTTP inbound adapter exposing the job board REST endpoints.
//!
//! Every endpoint lives under `/api/v1`; see [`configure_api`].

pub mod auth;
pub mod error;
pub mod health;
pub mod jobs;
pub mod registrations;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
mod validation;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the `/api/v1` handlers on a service config.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use jobboard::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(jobs::list_jobs)
        .service(jobs::create_job)
        .service(jobs::get_job)
        .service(registrations::add_registration)
        .service(registrations::remove_registration)
        .service(users::signup)
        .service(users::login)
        .service(users::create_user)
        .service(users::current_user);
}
