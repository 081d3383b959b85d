//! Tests for the registration ledger.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::authorization::{Forbidden, MockAuthorizationGuard};
use crate::domain::ports::{MockPostingRepository, MockRegistrationRepository};
use crate::domain::{
    CompanyName, ErrorCode, NewPosting, OwnerOnlyGuard, Posting, PostingTitle, Registration,
    RegistrationId,
};

type Ledger<G> = RegistrationLedgerService<MockPostingRepository, MockRegistrationRepository, G>;

struct Fixture {
    owner: UserId,
    posting: Posting,
    email: EmailAddress,
}

#[fixture]
fn world() -> Fixture {
    let owner = UserId::random();
    let new_posting = NewPosting::new(
        PostingTitle::new("Platform Engineer").expect("title"),
        CompanyName::new("Acme").expect("company"),
        None,
        None,
        owner.clone(),
    );
    Fixture {
        owner,
        posting: Posting::new(new_posting, Utc::now()),
        email: EmailAddress::new("r@x.com").expect("email"),
    }
}

fn postings_with(posting: Option<Posting>) -> MockPostingRepository {
    let mut repo = MockPostingRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(posting));
    repo
}

fn ledger<G>(
    postings: MockPostingRepository,
    registrations: MockRegistrationRepository,
    guard: G,
) -> Ledger<G> {
    RegistrationLedgerService::new(Arc::new(postings), Arc::new(registrations), Arc::new(guard))
}

fn registration_for(job_id: &PostingId, email: &EmailAddress) -> Registration {
    Registration {
        id: RegistrationId::random(),
        job_id: *job_id,
        email: email.clone(),
        created_at: Utc::now(),
    }
}

#[rstest]
#[tokio::test]
async fn add_to_missing_posting_does_not_touch_ledger(world: Fixture) {
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_insert().never();
    let service = ledger(postings_with(None), registrations, OwnerOnlyGuard);

    let outcome = service
        .add_registration(&world.posting.id(), &world.email)
        .await
        .expect("add completes");
    assert_eq!(outcome, AddRegistrationOutcome::JobNotFound);
}

#[rstest]
#[tokio::test]
async fn add_inserts_for_existing_posting(world: Fixture) {
    let job_id = world.posting.id();
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_insert()
        .with(eq(job_id), eq(world.email.clone()))
        .times(1)
        .returning(|job_id, email| Ok(registration_for(job_id, email)));
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        OwnerOnlyGuard,
    );

    let outcome = service
        .add_registration(&job_id, &world.email)
        .await
        .expect("add completes");
    match outcome {
        AddRegistrationOutcome::Added(registration) => {
            assert_eq!(registration.job_id, job_id);
            assert_eq!(registration.email, world.email);
        }
        other => panic!("expected Added, got {other:?}"),
    }
}

#[rstest]
#[case(
    RegistrationRepositoryError::duplicate("j", "r@x.com"),
    AddRegistrationOutcome::AlreadyRegistered
)]
#[case(
    RegistrationRepositoryError::posting_not_found("j"),
    AddRegistrationOutcome::JobNotFound
)]
#[tokio::test]
async fn add_translates_storage_conflicts(
    world: Fixture,
    #[case] failure: RegistrationRepositoryError,
    #[case] expected: AddRegistrationOutcome,
) {
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_insert()
        .return_once(move |_, _| Err(failure));
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        OwnerOnlyGuard,
    );

    let outcome = service
        .add_registration(&world.posting.id(), &world.email)
        .await
        .expect("add completes");
    assert_eq!(outcome, expected);
}

#[rstest]
#[tokio::test]
async fn add_surfaces_connection_failures(world: Fixture) {
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_insert()
        .return_once(|_, _| Err(RegistrationRepositoryError::connection("reset")));
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        OwnerOnlyGuard,
    );

    let err = service
        .add_registration(&world.posting.id(), &world.email)
        .await
        .expect_err("storage failure");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn remove_on_missing_posting_skips_authorization(world: Fixture) {
    let mut guard = MockAuthorizationGuard::new();
    guard.expect_assert_owner().never();
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_delete().never();
    let service = ledger(postings_with(None), registrations, guard);

    // A stranger would also fail authorization; existence wins.
    let outcome = service
        .remove_registration(&world.posting.id(), &world.email, &UserId::random())
        .await
        .expect("remove completes");
    assert_eq!(outcome, RemoveRegistrationOutcome::JobNotFound);
}

#[rstest]
#[tokio::test]
async fn remove_by_non_owner_is_forbidden_and_keeps_row(world: Fixture) {
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_delete().never();
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        OwnerOnlyGuard,
    );

    let outcome = service
        .remove_registration(&world.posting.id(), &world.email, &UserId::random())
        .await
        .expect("remove completes");
    assert_eq!(outcome, RemoveRegistrationOutcome::Forbidden);
}

#[rstest]
#[tokio::test]
async fn remove_consults_the_guard_with_owner_and_caller(world: Fixture) {
    let owner = world.owner.clone();
    let caller = UserId::random();
    let mut guard = MockAuthorizationGuard::new();
    guard
        .expect_assert_owner()
        .with(eq(owner), eq(caller.clone()))
        .times(1)
        .returning(|_, _| Err(Forbidden));
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_delete().never();
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        guard,
    );

    let outcome = service
        .remove_registration(&world.posting.id(), &world.email, &caller)
        .await
        .expect("remove completes");
    assert_eq!(outcome, RemoveRegistrationOutcome::Forbidden);
}

#[rstest]
#[case(true, RemoveRegistrationOutcome::Removed)]
#[case(false, RemoveRegistrationOutcome::RegistrationNotFound)]
#[tokio::test]
async fn remove_by_owner_reports_whether_a_row_matched(
    world: Fixture,
    #[case] deleted: bool,
    #[case] expected: RemoveRegistrationOutcome,
) {
    let job_id = world.posting.id();
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_delete()
        .with(eq(job_id), eq(world.email.clone()))
        .times(1)
        .returning(move |_, _| Ok(deleted));
    let service = ledger(
        postings_with(Some(world.posting.clone())),
        registrations,
        OwnerOnlyGuard,
    );

    let outcome = service
        .remove_registration(&job_id, &world.email, &world.owner)
        .await
        .expect("remove completes");
    assert_eq!(outcome, expected);
}
