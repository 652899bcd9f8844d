//! Account domain service.
//!
//! Implements registration, login, logout, and user lookup over a
//! [`UserRepository`]. Passwords are compared by plain equality.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, LoginOutcome, RegistrationOutcome, UserPersistenceError, UserRepository,
    UsersQuery,
};
use crate::domain::{Email, Error, LoginCredentials, NewUser, UpdateOutcome, User};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a service over the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> AccountCommand for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, user: NewUser) -> Result<RegistrationOutcome, Error> {
        let existing = self
            .users
            .find_by_email(user.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            debug!(email = %user.email(), "registration rejected: email taken");
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let outcome = self
            .users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;
        info!(email = %user.email(), id = %outcome.inserted_id, "user registered");
        Ok(RegistrationOutcome::Registered(outcome))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            debug!(email = %credentials.email(), "login rejected: unknown user");
            return Ok(LoginOutcome::UserNotFound);
        };

        if !credentials.matches(user.password()) {
            debug!(email = %credentials.email(), "login rejected: password mismatch");
            return Ok(LoginOutcome::PasswordMismatch);
        }

        let result = self
            .users
            .set_logged_in(credentials.email(), true)
            .await
            .map_err(map_repository_error)?;
        info!(email = %credentials.email(), "user logged in");
        Ok(LoginOutcome::LoggedIn { user, result })
    }

    async fn logout(&self, email: &Email) -> Result<UpdateOutcome, Error> {
        let result = self
            .users
            .set_logged_in(email, false)
            .await
            .map_err(map_repository_error)?;
        info!(%email, matched = result.matched_count, "user logged out");
        Ok(result)
    }
}

#[async_trait]
impl<R> UsersQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn find_user(&self, email: &Email) -> Result<Option<User>, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
