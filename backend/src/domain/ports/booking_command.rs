//! Driving port for booking mutations.

use async_trait::async_trait;

use crate::domain::{BookingAdmission, BookingDraft, DeleteOutcome, DocumentId, Error};

/// Domain use-case port for admitting and removing bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Admit `booking` if the renter has not booked the house and is under
    /// quota. Rejections are returned as [`BookingAdmission::Rejected`].
    async fn admit(&self, booking: BookingDraft) -> Result<BookingAdmission, Error>;

    /// Remove booking `id`.
    async fn remove(&self, id: &DocumentId) -> Result<DeleteOutcome, Error>;
}
