//! In-memory `BookingRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, DeleteOutcome, DocumentId, Email, InsertOutcome};

use super::{is_object_id, lock, next_id};

/// Booking repository rejecting a second booking of the same house by the
/// same renter.
#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn held_by<'a>(renter: &'a Email) -> impl Fn(&&Booking) -> bool + 'a {
    move |booking| booking.renter_email() == renter
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn find_by_renter_and_house(
        &self,
        renter: &Email,
        house: &DocumentId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(lock(&self.bookings)
            .iter()
            .filter(held_by(renter))
            .find(|booking| booking.house_id() == house)
            .cloned())
    }

    async fn count_by_renter(&self, renter: &Email) -> Result<u64, BookingRepositoryError> {
        let held = lock(&self.bookings).iter().filter(held_by(renter)).count();
        u64::try_from(held).map_err(|_| BookingRepositoryError::query("count overflow"))
    }

    async fn insert(
        &self,
        booking: &BookingDraft,
    ) -> Result<InsertOutcome, BookingRepositoryError> {
        let mut bookings = lock(&self.bookings);
        let taken = bookings
            .iter()
            .filter(held_by(booking.renter_email()))
            .any(|held| held.house_id() == booking.house_id());
        if taken {
            return Err(BookingRepositoryError::duplicate());
        }
        let id =
            next_id().ok_or_else(|| BookingRepositoryError::query("id generation failed"))?;
        bookings.push(booking.clone().into_booking(id.clone()));
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn list_by_renter(&self, renter: &Email) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(lock(&self.bookings)
            .iter()
            .filter(held_by(renter))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, BookingRepositoryError> {
        if !is_object_id(id) {
            return Err(BookingRepositoryError::invalid_id(id.as_ref()));
        }
        let mut bookings = lock(&self.bookings);
        let before = bookings.len();
        bookings.retain(|booking| booking.id() != id);
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: u64::from(bookings.len() < before),
        })
    }
}
