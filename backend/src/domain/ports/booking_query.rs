//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::{Booking, Email, Error};

/// Domain use-case port for reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Bookings held by `renter`.
    async fn list_by_renter(&self, renter: &Email) -> Result<Vec<Booking>, Error>;
}
