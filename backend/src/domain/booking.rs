//! Booking records and admission outcomes.
//!
//! ## Invariants
//! - At most one live booking per `(renter_email, houseId)` pair.
//! - A renter holds at most [`MAX_BOOKINGS_PER_RENTER`] live bookings.
//!
//! Both are enforced by the booking admission service before a draft reaches
//! the store.

use super::{Attributes, DocumentId, Email, InsertOutcome, strip_reserved_fields};

/// Field holding the renter's email.
pub const RENTER_EMAIL_FIELD: &str = "renter_email";
/// Field holding the booked house identifier.
pub const HOUSE_ID_FIELD: &str = "houseId";
/// Per-renter booking quota.
pub const MAX_BOOKINGS_PER_RENTER: u64 = 2;

/// A stored booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: DocumentId,
    renter_email: Email,
    house_id: DocumentId,
    attributes: Attributes,
}

impl Booking {
    /// Reassemble a stored booking.
    pub fn new(
        id: DocumentId,
        renter_email: Email,
        house_id: DocumentId,
        attributes: Attributes,
    ) -> Self {
        Self {
            id,
            renter_email,
            house_id,
            attributes: strip_keys(attributes),
        }
    }

    /// Store identifier.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Renter's email.
    pub fn renter_email(&self) -> &Email {
        &self.renter_email
    }

    /// Booked house.
    pub fn house_id(&self) -> &DocumentId {
        &self.house_id
    }

    /// Free-form booking fields.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A booking request awaiting admission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    renter_email: Email,
    house_id: DocumentId,
    attributes: Attributes,
}

impl BookingDraft {
    /// Build a draft; key fields are removed from `attributes`.
    pub fn new(renter_email: Email, house_id: DocumentId, attributes: Attributes) -> Self {
        Self {
            renter_email,
            house_id,
            attributes: strip_keys(attributes),
        }
    }

    /// Renter's email.
    pub fn renter_email(&self) -> &Email {
        &self.renter_email
    }

    /// House to book.
    pub fn house_id(&self) -> &DocumentId {
        &self.house_id
    }

    /// Free-form booking fields.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Promote the draft to a stored booking with `id`.
    pub fn into_booking(self, id: DocumentId) -> Booking {
        Booking {
            id,
            renter_email: self.renter_email,
            house_id: self.house_id,
            attributes: self.attributes,
        }
    }
}

/// Why a booking was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    /// The renter already holds a booking for this house.
    AlreadyBooked,
    /// The renter already holds the maximum number of bookings.
    QuotaExceeded,
}

impl BookingRejection {
    /// Client-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::AlreadyBooked => "You are already booked this house",
            Self::QuotaExceeded => "You are already booked maximum house",
        }
    }
}

impl std::fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Admission decision for a [`BookingDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAdmission {
    /// The booking was inserted.
    Admitted(InsertOutcome),
    /// The booking was refused; nothing was written.
    Rejected(BookingRejection),
}

fn strip_keys(attributes: Attributes) -> Attributes {
    let mut attributes = strip_reserved_fields(attributes);
    attributes.remove(RENTER_EMAIL_FIELD);
    attributes.remove(HOUSE_ID_FIELD);
    attributes
}
