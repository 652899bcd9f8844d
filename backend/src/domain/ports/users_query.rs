//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Email, Error, User};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// The user registered under `email`, if any.
    async fn find_user(&self, email: &Email) -> Result<Option<User>, Error>;
}
