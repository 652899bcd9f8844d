//! Listing domain service.
//!
//! Thin pass-through over [`HouseRepository`]: listings carry no invariants
//! beyond ownership being recorded at creation.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{HouseCommand, HouseQuery, HouseRepository, HouseRepositoryError};
use crate::domain::{
    DeleteOutcome, DocumentId, Email, Error, FilterOptions, House, HouseChanges, HouseDraft,
    InsertOutcome, SearchText, UpdateOutcome,
};

fn map_repository_error(error: HouseRepositoryError) -> Error {
    match error {
        HouseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("house repository unavailable: {message}"))
        }
        HouseRepositoryError::Query { message } => {
            Error::internal(format!("house repository error: {message}"))
        }
        HouseRepositoryError::InvalidId { id } => {
            Error::invalid_request(format!("invalid house id: {id}"))
        }
    }
}

/// Listing service implementing the house driving ports.
#[derive(Clone)]
pub struct HouseService<R> {
    houses: Arc<R>,
}

impl<R> HouseService<R> {
    /// Create a service over the house repository.
    pub fn new(houses: Arc<R>) -> Self {
        Self { houses }
    }
}

#[async_trait]
impl<R> HouseQuery for HouseService<R>
where
    R: HouseRepository,
{
    async fn get(&self, id: &DocumentId) -> Result<Option<House>, Error> {
        self.houses.find_by_id(id).await.map_err(map_repository_error)
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<House>, Error> {
        self.houses
            .list_page(page)
            .await
            .map_err(map_repository_error)
    }

    async fn count(&self) -> Result<u64, Error> {
        self.houses.count().await.map_err(map_repository_error)
    }

    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<House>, Error> {
        self.houses
            .list_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn search(&self, text: &SearchText) -> Result<Vec<House>, Error> {
        self.houses.search(text).await.map_err(map_repository_error)
    }

    async fn filter_options(&self) -> Result<FilterOptions, Error> {
        self.houses
            .filter_options()
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> HouseCommand for HouseService<R>
where
    R: HouseRepository,
{
    async fn create(&self, house: HouseDraft) -> Result<InsertOutcome, Error> {
        let outcome = self
            .houses
            .insert(&house)
            .await
            .map_err(map_repository_error)?;
        info!(owner = %house.house_owner(), id = %outcome.inserted_id, "house listed");
        Ok(outcome)
    }

    async fn update(&self, id: &DocumentId, changes: HouseChanges) -> Result<UpdateOutcome, Error> {
        let outcome = self
            .houses
            .update(id, &changes, true)
            .await
            .map_err(map_repository_error)?;
        info!(
            %id,
            matched = outcome.matched_count,
            upserted = outcome.upserted_id.is_some(),
            "house updated"
        );
        Ok(outcome)
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, Error> {
        let outcome = self
            .houses
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, deleted = outcome.deleted_count, "house deleted");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockHouseRepository;
    use rstest::rstest;

    fn id() -> DocumentId {
        DocumentId::new("h1").expect("valid id")
    }

    #[rstest]
    #[tokio::test]
    async fn update_always_upserts() {
        let mut repo = MockHouseRepository::new();
        repo.expect_update()
            .withf(|id, changes, upsert| id.as_ref() == "h1" && changes.is_empty() && *upsert)
            .times(1)
            .return_once(|_, _, _| {
                Ok(UpdateOutcome {
                    acknowledged: true,
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: Some(DocumentId::new("h1").expect("valid id")),
                })
            });

        let service = HouseService::new(Arc::new(repo));
        let outcome = service
            .update(&id(), HouseChanges::default())
            .await
            .expect("update succeeds");
        assert_eq!(outcome.upserted_id, Some(id()));
    }

    #[rstest]
    #[tokio::test]
    async fn get_passes_through_missing_listing() {
        let mut repo = MockHouseRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = HouseService::new(Arc::new(repo));
        assert_eq!(service.get(&id()).await.expect("lookup succeeds"), None);
    }

    #[rstest]
    #[case(HouseRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(HouseRepositoryError::query("boom"), ErrorCode::InternalError)]
    #[case(HouseRepositoryError::invalid_id("zz"), ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn repository_failures_map_to_domain_errors(
        #[case] failure: HouseRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockHouseRepository::new();
        repo.expect_delete()
            .times(1)
            .return_once(move |_| Err(failure));

        let service = HouseService::new(Arc::new(repo));
        let error = service.delete(&id()).await.expect_err("store failure");
        assert_eq!(error.code(), expected);
    }
}
