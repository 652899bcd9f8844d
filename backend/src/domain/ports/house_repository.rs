//! Port for listing persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    DeleteOutcome, DocumentId, Email, FilterOptions, House, HouseChanges, HouseDraft,
    InsertOutcome, SearchText, UpdateOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by house repository adapters.
    pub enum HouseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "house repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "house repository query failed: {message}",
        /// The identifier is not in the store's id format.
        InvalidId { id: String } => "malformed house id: {id}",
    }
}

/// Port for the `houses` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseRepository: Send + Sync {
    /// Fetch one listing.
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<House>, HouseRepositoryError>;

    /// One page of listings in store order.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<House>, HouseRepositoryError>;

    /// Number of stored listings.
    async fn count(&self) -> Result<u64, HouseRepositoryError>;

    /// Listings whose `houseOwner` equals `owner`.
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<House>, HouseRepositoryError>;

    /// Listings whose searchable fields contain `text`, case-insensitively.
    async fn search(&self, text: &SearchText) -> Result<Vec<House>, HouseRepositoryError>;

    /// Distinct values of the filterable fields.
    async fn filter_options(&self) -> Result<FilterOptions, HouseRepositoryError>;

    /// Insert a new listing.
    async fn insert(&self, house: &HouseDraft) -> Result<InsertOutcome, HouseRepositoryError>;

    /// Apply `changes` to the listing `id`, creating it when `upsert` is set
    /// and nothing matches.
    async fn update(
        &self,
        id: &DocumentId,
        changes: &HouseChanges,
        upsert: bool,
    ) -> Result<UpdateOutcome, HouseRepositoryError>;

    /// Remove the listing `id`, if present.
    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, HouseRepositoryError>;
}
