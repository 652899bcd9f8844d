//! MongoDB-backed `BookingRepository` over the `bookings` collection.
//!
//! `houseId` is stored as the string the client supplied. The unique index
//! created by [`MongoStore::ensure_indexes`] rejects a second booking for
//! the same renter and house; that rejection surfaces as
//! [`BookingRepositoryError::Duplicate`].

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    Booking, BookingDraft, DeleteOutcome, DocumentId, Email, HOUSE_ID_FIELD, InsertOutcome,
    RENTER_EMAIL_FIELD,
};

use super::documents::{ID, Record, inserted_id, object_id, to_document};
use super::error_mapping::{is_duplicate_key, map_driver_error};
use super::store::{BOOKINGS, MongoStore};

/// Booking repository storing one document per booking.
#[derive(Debug, Clone)]
pub struct MongoBookingRepository {
    store: MongoStore,
}

impl MongoBookingRepository {
    /// Create a repository over the connected store.
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

fn map_error(error: mongodb::error::Error) -> BookingRepositoryError {
    if is_duplicate_key(&error) {
        return BookingRepositoryError::duplicate();
    }
    map_driver_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn renter_filter(renter: &Email) -> Document {
    doc! { RENTER_EMAIL_FIELD: renter.as_ref() }
}

fn decode(document: Document) -> Result<Booking, BookingRepositoryError> {
    let mut record = Record::from_document(document).map_err(BookingRepositoryError::query)?;
    let renter = record
        .take_email(RENTER_EMAIL_FIELD)
        .map_err(BookingRepositoryError::query)?;
    let house = record
        .take_string(HOUSE_ID_FIELD)
        .and_then(|raw| DocumentId::new(raw).ok())
        .ok_or_else(|| {
            BookingRepositoryError::query(format!("booking {} has no usable houseId", record.id))
        })?;
    Ok(Booking::new(record.id, renter, house, record.fields))
}

fn encode(booking: &BookingDraft) -> Result<Document, BookingRepositoryError> {
    let mut document =
        to_document(booking.attributes()).map_err(BookingRepositoryError::query)?;
    document.insert(RENTER_EMAIL_FIELD, booking.renter_email().as_ref());
    document.insert(HOUSE_ID_FIELD, booking.house_id().as_ref());
    Ok(document)
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn find_by_renter_and_house(
        &self,
        renter: &Email,
        house: &DocumentId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut filter = renter_filter(renter);
        filter.insert(HOUSE_ID_FIELD, house.as_ref());
        self.store
            .collection(BOOKINGS)
            .find_one(filter)
            .await
            .map_err(map_error)?
            .map(decode)
            .transpose()
    }

    async fn count_by_renter(&self, renter: &Email) -> Result<u64, BookingRepositoryError> {
        self.store
            .collection(BOOKINGS)
            .count_documents(renter_filter(renter))
            .await
            .map_err(map_error)
    }

    async fn insert(
        &self,
        booking: &BookingDraft,
    ) -> Result<InsertOutcome, BookingRepositoryError> {
        let result = self
            .store
            .collection(BOOKINGS)
            .insert_one(encode(booking)?)
            .await
            .map_err(map_error)?;
        let id = inserted_id(&result.inserted_id).map_err(BookingRepositoryError::query)?;
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn list_by_renter(&self, renter: &Email) -> Result<Vec<Booking>, BookingRepositoryError> {
        let cursor = self
            .store
            .collection(BOOKINGS)
            .find(renter_filter(renter))
            .await
            .map_err(map_error)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(map_error)?;
        documents.into_iter().map(decode).collect()
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, BookingRepositoryError> {
        let oid = object_id(id).ok_or_else(|| BookingRepositoryError::invalid_id(id.as_ref()))?;
        let result = self
            .store
            .collection(BOOKINGS)
            .delete_one(doc! { ID: oid })
            .await
            .map_err(map_error)?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attributes;
    use mongodb::bson::oid::ObjectId;
    use rstest::rstest;

    #[rstest]
    fn booking_round_trips_key_fields() {
        let draft = BookingDraft::new(
            Email::new("a@x.com").expect("email"),
            DocumentId::new("H1").expect("id"),
            Attributes::new(),
        );
        let mut document = encode(&draft).expect("encodes");
        document.insert(ID, ObjectId::new());

        let booking = decode(document).expect("decodes");
        assert_eq!(booking.renter_email().as_ref(), "a@x.com");
        assert_eq!(booking.house_id().as_ref(), "H1");
        assert!(booking.attributes().is_empty());
    }

    #[rstest]
    fn booking_without_house_is_rejected() {
        let document = doc! { "_id": "b1", "renter_email": "a@x.com" };
        assert!(matches!(
            decode(document),
            Err(BookingRepositoryError::Query { .. })
        ));
    }
}
