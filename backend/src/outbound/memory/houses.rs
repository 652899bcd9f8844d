//! In-memory `HouseRepository`.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{HouseRepository, HouseRepositoryError};
use crate::domain::{
    DeleteOutcome, DocumentId, Email, FilterOptions, HOUSE_OWNER_FIELD, House, HouseChanges,
    HouseDraft, InsertOutcome, SearchText, UpdateOutcome,
};

use super::{is_object_id, lock, next_id};

/// Listing repository holding houses in insertion order.
#[derive(Debug, Default)]
pub struct MemoryHouseRepository {
    houses: Mutex<Vec<House>>,
}

impl MemoryHouseRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn checked(id: &DocumentId) -> Result<(), HouseRepositoryError> {
    if is_object_id(id) {
        Ok(())
    } else {
        Err(HouseRepositoryError::invalid_id(id.as_ref()))
    }
}

/// Apply `$set` semantics to a stored listing.
fn merged(house: &House, changes: &HouseChanges) -> House {
    let mut attributes = house.attributes().clone();
    for (key, value) in changes.fields() {
        if key != HOUSE_OWNER_FIELD {
            attributes.insert(key.clone(), value.clone());
        }
    }
    let owner = changes
        .owner()
        .unwrap_or_else(|| house.house_owner().clone());
    House::new(house.id().clone(), owner, attributes)
}

fn clamp(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl HouseRepository for MemoryHouseRepository {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<House>, HouseRepositoryError> {
        checked(id)?;
        Ok(lock(&self.houses)
            .iter()
            .find(|house| house.id() == id)
            .cloned())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<House>, HouseRepositoryError> {
        Ok(lock(&self.houses)
            .iter()
            .skip(clamp(page.offset()))
            .take(clamp(page.limit()))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, HouseRepositoryError> {
        let len = lock(&self.houses).len();
        u64::try_from(len).map_err(|_| HouseRepositoryError::query("count overflow"))
    }

    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<House>, HouseRepositoryError> {
        Ok(lock(&self.houses)
            .iter()
            .filter(|house| house.house_owner() == owner)
            .cloned()
            .collect())
    }

    async fn search(&self, text: &SearchText) -> Result<Vec<House>, HouseRepositoryError> {
        Ok(lock(&self.houses)
            .iter()
            .filter(|house| house.matches(text))
            .cloned()
            .collect())
    }

    async fn filter_options(&self) -> Result<FilterOptions, HouseRepositoryError> {
        let houses = lock(&self.houses);
        Ok(FilterOptions::collect(houses.iter()))
    }

    async fn insert(&self, house: &HouseDraft) -> Result<InsertOutcome, HouseRepositoryError> {
        let id = next_id().ok_or_else(|| HouseRepositoryError::query("id generation failed"))?;
        lock(&self.houses).push(house.clone().into_house(id.clone()));
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn update(
        &self,
        id: &DocumentId,
        changes: &HouseChanges,
        upsert: bool,
    ) -> Result<UpdateOutcome, HouseRepositoryError> {
        checked(id)?;
        let mut houses = lock(&self.houses);
        let mut outcome = UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        };

        if let Some(house) = houses.iter_mut().find(|house| house.id() == id) {
            let updated = merged(house, changes);
            outcome.matched_count = 1;
            if updated != *house {
                *house = updated;
                outcome.modified_count = 1;
            }
        } else if let Some(owner) = changes.owner().filter(|_| upsert) {
            houses.push(House::new(id.clone(), owner, changes.fields().clone()));
            outcome.upserted_id = Some(id.clone());
        }
        Ok(outcome)
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, HouseRepositoryError> {
        checked(id)?;
        let mut houses = lock(&self.houses);
        let before = houses.len();
        if let Some(index) = houses.iter().position(|house| house.id() == id) {
            houses.remove(index);
        }
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: u64::from(houses.len() < before),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attributes;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn object(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn owner() -> Email {
        Email::new("o@x.com").expect("valid email")
    }

    #[fixture]
    fn unused_id() -> DocumentId {
        next_id().expect("generated id")
    }

    async fn seeded(names: &[&str]) -> (MemoryHouseRepository, Vec<DocumentId>) {
        let repo = MemoryHouseRepository::new();
        let mut ids = Vec::new();
        for name in names {
            let draft = HouseDraft::new(owner(), object(json!({ "name": name, "city": "Dhaka" })));
            ids.push(repo.insert(&draft).await.expect("insert").inserted_id);
        }
        (repo, ids)
    }

    #[rstest]
    #[tokio::test]
    async fn pages_follow_insertion_order() {
        let (repo, ids) = seeded(&["a", "b", "c"]).await;
        let page = repo
            .list_page(PageRequest::new(1, 2).expect("valid page"))
            .await
            .expect("page");
        assert_eq!(page.len(), 1);
        assert_eq!(Some(page[0].id()), ids.get(2));
        assert_eq!(repo.count().await.expect("count"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn update_sets_fields_and_reports_modification() {
        let (repo, ids) = seeded(&["a"]).await;
        let id = ids.first().expect("seeded id");
        let changes = HouseChanges::new(object(json!({ "city": "Sylhet" })));

        let first = repo.update(id, &changes, true).await.expect("update");
        let again = repo.update(id, &changes, true).await.expect("update");

        assert_eq!((first.matched_count, first.modified_count), (1, 1));
        assert_eq!((again.matched_count, again.modified_count), (1, 0));
        let house = repo.find_by_id(id).await.expect("get").expect("present");
        assert_eq!(house.attribute("city"), Some(&json!("Sylhet")));
        assert_eq!(house.attribute("name"), Some(&json!("a")));
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_creates_listing_with_owner(unused_id: DocumentId) {
        let repo = MemoryHouseRepository::new();
        let changes = HouseChanges::new(object(json!({ "houseOwner": "o@x.com", "name": "new" })));

        let outcome = repo.update(&unused_id, &changes, true).await.expect("upsert");

        assert_eq!(outcome.upserted_id.as_ref(), Some(&unused_id));
        let house = repo
            .find_by_id(&unused_id)
            .await
            .expect("get")
            .expect("created");
        assert_eq!(house.house_owner(), &owner());
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_without_owner_creates_nothing(unused_id: DocumentId) {
        let repo = MemoryHouseRepository::new();
        let changes = HouseChanges::new(object(json!({ "name": "orphan" })));

        let outcome = repo.update(&unused_id, &changes, true).await.expect("update");

        assert_eq!(outcome.matched_count, 0);
        assert!(outcome.upserted_id.is_none());
        assert_eq!(repo.count().await.expect("count"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_ids_are_rejected() {
        let repo = MemoryHouseRepository::new();
        let err = repo
            .delete(&DocumentId::new("H1").expect("id"))
            .await
            .expect_err("not an object id");
        assert_eq!(err, HouseRepositoryError::invalid_id("H1"));
    }

    #[rstest]
    #[tokio::test]
    async fn search_and_filters_read_listing_fields() {
        let (repo, _) = seeded(&["Lake View", "Hill Top"]).await;
        let hits = repo
            .search(&SearchText::new("lake"))
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);

        let options = repo.filter_options().await.expect("filters");
        assert_eq!(options.city, vec![json!("Dhaka")]);
    }
}
