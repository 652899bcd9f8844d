//! Driving port for listing reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{DocumentId, Email, Error, FilterOptions, House, SearchText};

/// Domain use-case port for reading listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseQuery: Send + Sync {
    /// One listing, or `None` when the id is unknown.
    async fn get(&self, id: &DocumentId) -> Result<Option<House>, Error>;

    /// One page of listings.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<House>, Error>;

    /// Total number of listings.
    async fn count(&self) -> Result<u64, Error>;

    /// Listings owned by `owner`.
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<House>, Error>;

    /// Listings matching `text`; empty text matches everything.
    async fn search(&self, text: &SearchText) -> Result<Vec<House>, Error>;

    /// Distinct values for client-side filters.
    async fn filter_options(&self) -> Result<FilterOptions, Error>;
}
