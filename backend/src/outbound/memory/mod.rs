//! In-process repository adapters.
//!
//! Used when no MongoDB URI is configured and by the end-to-end HTTP tests.
//! Records live in mutex-guarded vectors and receive `ObjectId` hex
//! identifiers, so ids look and validate exactly as they do against MongoDB.
//! Bookings enforce the same `(renter_email, houseId)` uniqueness as the
//! MongoDB index.

mod bookings;
mod houses;
mod users;

use std::sync::{Mutex, MutexGuard, PoisonError};

use mongodb::bson::oid::ObjectId;

use crate::domain::DocumentId;

pub use bookings::MemoryBookingRepository;
pub use houses::MemoryHouseRepository;
pub use users::MemoryUserRepository;

/// Lock `records`, recovering the data if a previous holder panicked.
fn lock<T>(records: &Mutex<T>) -> MutexGuard<'_, T> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fresh identifier in the same format MongoDB generates.
fn next_id() -> Option<DocumentId> {
    DocumentId::new(ObjectId::new().to_hex()).ok()
}

/// Whether `id` has the shape of a generated identifier.
fn is_object_id(id: &DocumentId) -> bool {
    ObjectId::parse_str(id.as_ref()).is_ok()
}
