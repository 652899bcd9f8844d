//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Email, InsertOutcome, NewUser, UpdateOutcome, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for the `users` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user record.
    async fn insert(&self, user: &NewUser) -> Result<InsertOutcome, UserPersistenceError>;

    /// Set the login flag for every record with `email`; zero matches is not
    /// an error.
    async fn set_logged_in(
        &self,
        email: &Email,
        logged_in: bool,
    ) -> Result<UpdateOutcome, UserPersistenceError>;
}
