//! MongoDB-backed `HouseRepository` over the `houses` collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use pagination::PageRequest;
use serde_json::Value;

use crate::domain::ports::{HouseRepository, HouseRepositoryError};
use crate::domain::{
    DeleteOutcome, DocumentId, Email, FILTER_FIELDS, FilterOptions, HOUSE_OWNER_FIELD, House,
    HouseChanges, HouseDraft, InsertOutcome, SEARCHABLE_FIELDS, SearchText, UpdateOutcome,
};

use super::documents::{ID, Record, document_id, inserted_id, object_id, to_document};
use super::error_mapping::map_driver_error;
use super::store::{HOUSES, MongoStore};

/// Listing repository storing one document per house.
#[derive(Debug, Clone)]
pub struct MongoHouseRepository {
    store: MongoStore,
}

impl MongoHouseRepository {
    /// Create a repository over the connected store.
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }

    async fn find_many(
        &self,
        filter: Document,
        page: Option<PageRequest>,
    ) -> Result<Vec<House>, HouseRepositoryError> {
        let collection = self.store.collection(HOUSES);
        let cursor = match page {
            Some(page) => {
                let limit = i64::try_from(page.limit()).map_err(|_| {
                    HouseRepositoryError::query(format!("limit {} too large", page.limit()))
                })?;
                collection
                    .find(filter)
                    .skip(page.offset())
                    .limit(limit)
                    .await
            }
            None => collection.find(filter).await,
        }
        .map_err(map_error)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(map_error)?;
        documents.into_iter().map(decode).collect()
    }
}

fn map_error(error: mongodb::error::Error) -> HouseRepositoryError {
    map_driver_error(
        error,
        HouseRepositoryError::query,
        HouseRepositoryError::connection,
    )
}

fn id_filter(id: &DocumentId) -> Result<Document, HouseRepositoryError> {
    let oid = object_id(id).ok_or_else(|| HouseRepositoryError::invalid_id(id.as_ref()))?;
    Ok(doc! { ID: oid })
}

fn decode(document: Document) -> Result<House, HouseRepositoryError> {
    let mut record = Record::from_document(document).map_err(HouseRepositoryError::query)?;
    let owner = record
        .take_email(HOUSE_OWNER_FIELD)
        .map_err(HouseRepositoryError::query)?;
    Ok(House::new(record.id, owner, record.fields))
}

fn encode(house: &HouseDraft) -> Result<Document, HouseRepositoryError> {
    let mut document = to_document(house.attributes()).map_err(HouseRepositoryError::query)?;
    document.insert(HOUSE_OWNER_FIELD, house.house_owner().as_ref());
    Ok(document)
}

/// Case-insensitive literal match on any searchable field.
fn search_filter(text: &SearchText) -> Document {
    if text.is_empty() {
        return Document::new();
    }
    let pattern = regex::escape(text.as_str());
    let clauses: Vec<Bson> = SEARCHABLE_FIELDS
        .iter()
        .map(|field| Bson::Document(doc! { *field: { "$regex": pattern.as_str(), "$options": "i" } }))
        .collect();
    doc! { "$or": clauses }
}

/// One `$addToSet` per filter field, grouped over the whole collection.
fn filter_pipeline() -> Vec<Document> {
    let mut group = doc! { ID: Bson::Null };
    for field in FILTER_FIELDS {
        group.insert(field, doc! { "$addToSet": format!("${field}") });
    }
    vec![doc! { "$group": group }]
}

fn decode_filter_options(summary: Option<Document>) -> FilterOptions {
    let Some(summary) = summary else {
        return FilterOptions::default();
    };
    FilterOptions::from_values(|field| match summary.get_array(field) {
        Ok(values) => values
            .iter()
            .cloned()
            .map(Bson::into_relaxed_extjson)
            .collect(),
        Err(_) => Vec::<Value>::new(),
    })
}

#[async_trait]
impl HouseRepository for MongoHouseRepository {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<House>, HouseRepositoryError> {
        self.store
            .collection(HOUSES)
            .find_one(id_filter(id)?)
            .await
            .map_err(map_error)?
            .map(decode)
            .transpose()
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<House>, HouseRepositoryError> {
        self.find_many(Document::new(), Some(page)).await
    }

    async fn count(&self) -> Result<u64, HouseRepositoryError> {
        self.store
            .collection(HOUSES)
            .count_documents(Document::new())
            .await
            .map_err(map_error)
    }

    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<House>, HouseRepositoryError> {
        self.find_many(doc! { HOUSE_OWNER_FIELD: owner.as_ref() }, None)
            .await
    }

    async fn search(&self, text: &SearchText) -> Result<Vec<House>, HouseRepositoryError> {
        self.find_many(search_filter(text), None).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, HouseRepositoryError> {
        let mut cursor = self
            .store
            .collection(HOUSES)
            .aggregate(filter_pipeline())
            .await
            .map_err(map_error)?;
        let summary = cursor.try_next().await.map_err(map_error)?;
        Ok(decode_filter_options(summary))
    }

    async fn insert(&self, house: &HouseDraft) -> Result<InsertOutcome, HouseRepositoryError> {
        let result = self
            .store
            .collection(HOUSES)
            .insert_one(encode(house)?)
            .await
            .map_err(map_error)?;
        let id = inserted_id(&result.inserted_id).map_err(HouseRepositoryError::query)?;
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn update(
        &self,
        id: &DocumentId,
        changes: &HouseChanges,
        upsert: bool,
    ) -> Result<UpdateOutcome, HouseRepositoryError> {
        let fields = to_document(changes.fields()).map_err(HouseRepositoryError::query)?;
        // An upsert without an owner would store a listing nobody can read back.
        let upsert = upsert && changes.owner().is_some();
        let result = self
            .store
            .collection(HOUSES)
            .update_one(id_filter(id)?, doc! { "$set": fields })
            .upsert(upsert)
            .await
            .map_err(map_error)?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().and_then(document_id),
        })
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, HouseRepositoryError> {
        let result = self
            .store
            .collection(HOUSES)
            .delete_one(id_filter(id)?)
            .await
            .map_err(map_error)?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
