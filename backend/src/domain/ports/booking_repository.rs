//! Port for booking persistence.

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, DeleteOutcome, DocumentId, Email, InsertOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// The identifier is not in the store's id format.
        InvalidId { id: String } => "malformed booking id: {id}",
        /// The store refused a second booking for the same renter and house.
        Duplicate => "booking already exists for this renter and house",
    }
}

/// Port for the `bookings` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Booking held by `renter` for `house`, if any.
    async fn find_by_renter_and_house(
        &self,
        renter: &Email,
        house: &DocumentId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Number of bookings held by `renter`.
    async fn count_by_renter(&self, renter: &Email) -> Result<u64, BookingRepositoryError>;

    /// Insert a booking.
    ///
    /// Adapters that enforce uniqueness of `(renter_email, houseId)` report a
    /// violation as [`BookingRepositoryError::Duplicate`].
    async fn insert(&self, booking: &BookingDraft)
    -> Result<InsertOutcome, BookingRepositoryError>;

    /// Bookings held by `renter`.
    async fn list_by_renter(&self, renter: &Email) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Remove the booking `id`, if present.
    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, BookingRepositoryError>;
}
