//! Driving port for listing mutations.

use async_trait::async_trait;

use crate::domain::{
    DeleteOutcome, DocumentId, Error, HouseChanges, HouseDraft, InsertOutcome, UpdateOutcome,
};

/// Domain use-case port for creating, updating, and deleting listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseCommand: Send + Sync {
    /// Store a new listing.
    async fn create(&self, house: HouseDraft) -> Result<InsertOutcome, Error>;

    /// Set `changes` on listing `id`, creating it when absent.
    async fn update(&self, id: &DocumentId, changes: HouseChanges)
    -> Result<UpdateOutcome, Error>;

    /// Remove listing `id`.
    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, Error>;
}
