//! Tests for booking admission.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::FutureExt;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockBookingRepository;
use crate::domain::{Attributes, ErrorCode, InsertOutcome};

type Held = Arc<Mutex<Vec<(Email, DocumentId)>>>;

#[fixture]
fn renter() -> Email {
    Email::new("a@x.com").expect("valid email")
}

fn house(id: &str) -> DocumentId {
    DocumentId::new(id).expect("valid id")
}

fn draft(renter: &Email, house_id: &str) -> BookingDraft {
    BookingDraft::new(renter.clone(), house(house_id), Attributes::new())
}

/// Mock backed by a shared list so sequential admissions see earlier inserts.
fn stateful_repo(held: &Held) -> MockBookingRepository {
    let mut repo = MockBookingRepository::new();

    let rows = Arc::clone(held);
    repo.expect_find_by_renter_and_house()
        .returning(move |renter, house_id| {
            let rows = rows.lock().expect("rows lock");
            Ok(rows
                .iter()
                .find(|(r, h)| r == renter && h == house_id)
                .map(|(r, h)| {
                    Booking::new(h.clone(), r.clone(), h.clone(), Attributes::new())
                }))
        });

    let rows = Arc::clone(held);
    repo.expect_count_by_renter().returning(move |renter| {
        let rows = rows.lock().expect("rows lock");
        Ok(rows.iter().filter(|(r, _)| r == renter).count() as u64)
    });

    let rows = Arc::clone(held);
    repo.expect_insert().returning(move |booking| {
        let mut rows = rows.lock().expect("rows lock");
        rows.push((booking.renter_email().clone(), booking.house_id().clone()));
        Ok(InsertOutcome::acknowledged(booking.house_id().clone()))
    });

    repo
}

#[rstest]
#[tokio::test]
async fn third_booking_exceeds_quota_without_insert(renter: Email) {
    let held = Held::default();
    let service = BookingService::new(Arc::new(stateful_repo(&held)));

    for house_id in ["H1", "H2"] {
        let admission = service
            .admit(draft(&renter, house_id))
            .await
            .expect("admission runs");
        assert!(matches!(admission, BookingAdmission::Admitted(_)));
    }

    let admission = service
        .admit(draft(&renter, "H3"))
        .await
        .expect("admission runs");
    assert_eq!(
        admission,
        BookingAdmission::Rejected(BookingRejection::QuotaExceeded)
    );
    assert_eq!(held.lock().expect("rows lock").len(), 2);
}

#[rstest]
#[tokio::test]
async fn rebooking_same_house_is_rejected(renter: Email) {
    let held = Held::default();
    let service = BookingService::new(Arc::new(stateful_repo(&held)));

    let first = service
        .admit(draft(&renter, "H1"))
        .await
        .expect("admission runs");
    assert_eq!(
        first,
        BookingAdmission::Admitted(InsertOutcome::acknowledged(house("H1")))
    );

    let second = service
        .admit(draft(&renter, "H1"))
        .await
        .expect("admission runs");
    assert_eq!(
        second,
        BookingAdmission::Rejected(BookingRejection::AlreadyBooked)
    );
    assert_eq!(held.lock().expect("rows lock").len(), 1);
}

#[rstest]
#[tokio::test]
async fn sequential_requests_never_exceed_quota(renter: Email) {
    let held = Held::default();
    let service = BookingService::new(Arc::new(stateful_repo(&held)));

    for house_id in ["H1", "H1", "H2", "H3", "H2", "H4", "H5"] {
        service
            .admit(draft(&renter, house_id))
            .await
            .expect("admission runs");
        let count = held.lock().expect("rows lock").len() as u64;
        assert!(count <= MAX_BOOKINGS_PER_RENTER);
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_requests_from_one_renter_respect_both_rules(renter: Email) {
    let held = Held::default();
    let service = Arc::new(BookingService::new(Arc::new(stateful_repo(&held))));

    let tasks: Vec<_> = ["H1", "H1", "H2", "H3", "H1", "H2"]
        .into_iter()
        .map(|house_id| {
            let service = Arc::clone(&service);
            let booking = draft(&renter, house_id);
            tokio::spawn(async move { service.admit(booking).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("task joins").expect("admission runs");
    }

    let rows = held.lock().expect("rows lock");
    assert_eq!(rows.len() as u64, MAX_BOOKINGS_PER_RENTER);
    assert_ne!(rows[0].1, rows[1].1);
}

#[rstest]
#[tokio::test]
async fn store_duplicate_is_reported_as_already_booked(renter: Email) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_renter_and_house()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_count_by_renter().times(1).return_once(|_| Ok(0));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(BookingRepositoryError::duplicate()));

    let service = BookingService::new(Arc::new(repo));
    let admission = service
        .admit(draft(&renter, "H1"))
        .await
        .expect("admission runs");
    assert_eq!(
        admission,
        BookingAdmission::Rejected(BookingRejection::AlreadyBooked)
    );
}

#[rstest]
#[tokio::test]
async fn quota_check_skips_insert(renter: Email) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_renter_and_house()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_count_by_renter()
        .times(1)
        .return_once(|_| Ok(MAX_BOOKINGS_PER_RENTER));
    repo.expect_insert().times(0);

    let service = BookingService::new(Arc::new(repo));
    let admission = service
        .admit(draft(&renter, "H9"))
        .await
        .expect("admission runs");
    assert_eq!(
        admission,
        BookingAdmission::Rejected(BookingRejection::QuotaExceeded)
    );
}

#[rstest]
#[case(BookingRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(BookingRepositoryError::query("boom"), ErrorCode::InternalError)]
#[case(BookingRepositoryError::invalid_id("zz"), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn remove_maps_repository_failures(
    #[case] failure: BookingRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockBookingRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = BookingService::new(Arc::new(repo));
    let error = service.remove(&house("b1")).await.expect_err("store failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn renter_locks_serialise_one_renter_and_clean_up(renter: Email) {
    let locks = RenterLocks::default();
    let other = Email::new("b@x.com").expect("valid email");

    let held = locks.acquire(&renter).await;
    assert_eq!(locks.tracked(), 1);

    let blocked = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&renter)).await;
    assert!(blocked.is_err(), "second acquire for the same renter must wait");

    let unrelated = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&other))
        .await
        .expect("other renters are not blocked");
    drop(unrelated);

    drop(held);
    assert_eq!(locks.tracked(), 0);
}

#[rstest]
#[tokio::test]
async fn abandoned_waiter_entry_clears_on_next_release(renter: Email) {
    let locks = RenterLocks::default();
    let held = locks.acquire(&renter).await;
    let mut waiting = Box::pin(locks.acquire(&renter));
    assert!((&mut waiting).now_or_never().is_none());

    drop(held);
    drop(waiting);
    assert_eq!(locks.tracked(), 1);

    drop(locks.acquire(&renter).await);
    assert_eq!(locks.tracked(), 0);
}
