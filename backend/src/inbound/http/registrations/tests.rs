//! Registration endpoint behaviour over the in-memory store.

use super::*;
use crate::domain::ports::AuthSession;
use crate::inbound::http::test_utils::{TestBackend, bearer, test_app, test_backend};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

struct Fixture {
    backend: TestBackend,
    owner: AuthSession,
    job_id: String,
}

async fn fixture() -> Fixture {
    let backend = test_backend();
    let owner = backend.signup("u1@x.com").await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/jobs")
            .insert_header(bearer(&owner))
            .set_json(json!({"title": "Backend Engineer", "company": "Acme Ltd"}))
            .to_request(),
    )
    .await;
    let job_id = created["id"].as_str().expect("job id").to_owned();
    Fixture {
        backend,
        owner,
        job_id,
    }
}

async fn send(
    backend: &TestBackend,
    request: actix_test::TestRequest,
) -> ServiceResponse {
    let app = actix_test::init_service(test_app(backend.state.clone())).await;
    actix_test::call_service(&app, request.to_request()).await
}

fn add(job_id: &str, email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{job_id}/registrations"))
        .set_json(json!({ "email": email }))
}

fn remove(job_id: &str, email: &str, session: Option<&AuthSession>) -> actix_test::TestRequest {
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/jobs/{job_id}/registrations"))
        .set_json(json!({ "email": email }));
    match session {
        Some(session) => request.insert_header(bearer(session)),
        None => request,
    }
}

async fn registrants(backend: &TestBackend, job_id: &str) -> Value {
    let res = send(
        backend,
        actix_test::TestRequest::get().uri(&format!("/api/v1/jobs/{job_id}")),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    body["registrations"].clone()
}

#[rstest]
#[actix_web::test]
async fn anonymous_callers_can_register_once() {
    let Fixture {
        backend, job_id, ..
    } = fixture().await;

    let first = send(&backend, add(&job_id, "r@x.com")).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(first).await;
    assert_eq!(body, json!({"success": true}));

    let second = send(&backend, add(&job_id, " R@X.com ")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["code"], "conflict");

    assert_eq!(registrants(&backend, &job_id).await, json!(["r@x.com"]));
}

#[rstest]
#[actix_web::test]
async fn registering_for_an_unknown_job_is_not_found() {
    let backend = test_backend();
    let res = send(
        &backend,
        add("00000000-0000-0000-0000-000000000000", "r@x.com"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("")]
#[case("not-an-email")]
#[actix_web::test]
async fn invalid_emails_are_rejected(#[case] email: &str) {
    let Fixture {
        backend, job_id, ..
    } = fixture().await;
    let res = send(&backend, add(&job_id, email)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn owner_removes_registration_then_it_is_gone() {
    let Fixture {
        backend,
        owner,
        job_id,
    } = fixture().await;
    send(&backend, add(&job_id, "a@example.com")).await;

    let res = send(&backend, remove(&job_id, "a@example.com", Some(&owner))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(registrants(&backend, &job_id).await, json!([]));

    let again = send(&backend, remove(&job_id, "a@example.com", Some(&owner))).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(again).await;
    assert_eq!(body["message"], "registration not found");
}

#[rstest]
#[actix_web::test]
async fn other_users_are_forbidden_and_registration_survives() {
    let Fixture {
        backend, job_id, ..
    } = fixture().await;
    let intruder = backend.signup("intruder@x.com").await;
    send(&backend, add(&job_id, "a@example.com")).await;

    let res = send(&backend, remove(&job_id, "a@example.com", Some(&intruder))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(registrants(&backend, &job_id).await, json!(["a@example.com"]));
}

#[rstest]
#[actix_web::test]
async fn removal_without_a_credential_is_unauthorised() {
    let Fixture {
        backend, job_id, ..
    } = fixture().await;
    send(&backend, add(&job_id, "a@example.com")).await;

    let res = send(&backend, remove(&job_id, "a@example.com", None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn missing_job_is_reported_before_ownership() {
    let Fixture { backend, .. } = fixture().await;
    let intruder = backend.signup("intruder@x.com").await;

    let res = send(
        &backend,
        remove(
            "00000000-0000-0000-0000-000000000000",
            "a@example.com",
            Some(&intruder),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "job not found");
}
