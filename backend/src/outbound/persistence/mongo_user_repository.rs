//! MongoDB-backed `UserRepository` over the `users` collection.

use async_trait::async_trait;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, InsertOutcome, NewUser, UpdateOutcome, User};

use super::documents::{Record, document_id, inserted_id, to_document};
use super::error_mapping::map_driver_error;
use super::store::{MongoStore, USERS};

const EMAIL: &str = "email";
const PASSWORD: &str = "password";
const LOGGED_IN: &str = "loggedIn";

/// User repository storing one document per account.
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    store: MongoStore,
}

impl MongoUserRepository {
    /// Create a repository over the connected store.
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

fn map_error(error: mongodb::error::Error) -> UserPersistenceError {
    map_driver_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn decode(document: Document) -> Result<User, UserPersistenceError> {
    let mut record = Record::from_document(document).map_err(UserPersistenceError::query)?;
    let email = record
        .take_email(EMAIL)
        .map_err(UserPersistenceError::query)?;
    let password = record.take_string(PASSWORD).unwrap_or_default();
    let logged_in = record
        .fields
        .remove(LOGGED_IN)
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    Ok(User::new(record.id, email, password, logged_in, record.fields))
}

fn encode(user: &NewUser) -> Result<Document, UserPersistenceError> {
    let mut document = to_document(user.profile()).map_err(UserPersistenceError::query)?;
    document.insert(EMAIL, user.email().as_ref());
    document.insert(PASSWORD, user.password());
    document.insert(LOGGED_IN, user.logged_in());
    Ok(document)
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        self.store
            .collection(USERS)
            .find_one(doc! { EMAIL: email.as_ref() })
            .await
            .map_err(map_error)?
            .map(decode)
            .transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<InsertOutcome, UserPersistenceError> {
        let result = self
            .store
            .collection(USERS)
            .insert_one(encode(user)?)
            .await
            .map_err(map_error)?;
        let id = inserted_id(&result.inserted_id).map_err(UserPersistenceError::query)?;
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn set_logged_in(
        &self,
        email: &Email,
        logged_in: bool,
    ) -> Result<UpdateOutcome, UserPersistenceError> {
        let result = self
            .store
            .collection(USERS)
            .update_one(
                doc! { EMAIL: email.as_ref() },
                doc! { "$set": { LOGGED_IN: logged_in } },
            )
            .await
            .map_err(map_error)?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().and_then(document_id),
        })
    }
}
