//! Booking admission.
//!
//! A booking is admitted only if the renter has no booking for the same house
//! and holds fewer than [`MAX_BOOKINGS_PER_RENTER`] bookings. The check and
//! the insert run under a per-renter async lock so concurrent requests from
//! one renter cannot both pass the checks. Stores that enforce uniqueness of
//! `(renter_email, houseId)` report violations as
//! [`BookingRepositoryError::Duplicate`], which is folded into
//! [`BookingRejection::AlreadyBooked`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info};

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError,
};
use crate::domain::{
    Booking, BookingAdmission, BookingDraft, BookingRejection, DeleteOutcome, DocumentId, Email,
    Error, MAX_BOOKINGS_PER_RENTER,
};

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::InvalidId { id } => {
            Error::invalid_request(format!("invalid booking id: {id}"))
        }
        BookingRepositoryError::Duplicate => Error::conflict("booking already exists"),
    }
}

/// Async locks keyed by renter email.
///
/// Entries are removed once no task holds or waits on them.
#[derive(Debug, Default)]
pub struct RenterLocks {
    locks: Mutex<HashMap<Email, Arc<AsyncMutex<()>>>>,
}

impl RenterLocks {
    /// Wait for exclusive access to `renter`'s bookings.
    ///
    /// The entry is created before waiting. If this future is dropped while
    /// waiting, the entry stays in the map until the next guard for the same
    /// renter is released.
    pub async fn acquire(&self, renter: &Email) -> RenterGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(renter.clone()).or_default())
        };
        RenterGuard {
            owner: self,
            renter: renter.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of renters with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, renter: &Email) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(renter)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(renter);
        }
    }
}

/// Held while a renter's admission runs.
#[derive(Debug)]
pub struct RenterGuard<'a> {
    owner: &'a RenterLocks,
    renter: Email,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RenterGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.owner.release(&self.renter);
    }
}

/// Booking service implementing the booking driving ports.
#[derive(Clone)]
pub struct BookingService<R> {
    bookings: Arc<R>,
    locks: Arc<RenterLocks>,
}

impl<R> BookingService<R> {
    /// Create a service over the booking repository.
    pub fn new(bookings: Arc<R>) -> Self {
        Self {
            bookings,
            locks: Arc::new(RenterLocks::default()),
        }
    }
}

impl<R> BookingService<R>
where
    R: BookingRepository,
{
    async fn check(&self, booking: &BookingDraft) -> Result<Option<BookingRejection>, Error> {
        let renter = booking.renter_email();
        let existing = self
            .bookings
            .find_by_renter_and_house(renter, booking.house_id())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Ok(Some(BookingRejection::AlreadyBooked));
        }

        let held = self
            .bookings
            .count_by_renter(renter)
            .await
            .map_err(map_repository_error)?;
        if held >= MAX_BOOKINGS_PER_RENTER {
            return Ok(Some(BookingRejection::QuotaExceeded));
        }
        Ok(None)
    }
}

#[async_trait]
impl<R> BookingCommand for BookingService<R>
where
    R: BookingRepository,
{
    async fn admit(&self, booking: BookingDraft) -> Result<BookingAdmission, Error> {
        let renter = booking.renter_email();
        let _guard = self.locks.acquire(renter).await;

        if let Some(rejection) = self.check(&booking).await? {
            debug!(%renter, house = %booking.house_id(), ?rejection, "booking rejected");
            return Ok(BookingAdmission::Rejected(rejection));
        }

        match self.bookings.insert(&booking).await {
            Ok(outcome) => {
                info!(
                    %renter,
                    house = %booking.house_id(),
                    id = %outcome.inserted_id,
                    "booking admitted"
                );
                Ok(BookingAdmission::Admitted(outcome))
            }
            Err(BookingRepositoryError::Duplicate) => {
                debug!(%renter, house = %booking.house_id(), "booking rejected by store index");
                Ok(BookingAdmission::Rejected(BookingRejection::AlreadyBooked))
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn remove(&self, id: &DocumentId) -> Result<DeleteOutcome, Error> {
        let outcome = self
            .bookings
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, deleted = outcome.deleted_count, "booking removed");
        Ok(outcome)
    }
}

#[async_trait]
impl<R> BookingQuery for BookingService<R>
where
    R: BookingRepository,
{
    async fn list_by_renter(&self, renter: &Email) -> Result<Vec<Booking>, Error> {
        self.bookings
            .list_by_renter(renter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
