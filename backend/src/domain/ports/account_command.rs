//! Driving port for registration, login, and logout.
//!
//! Rejections (duplicate registration, unknown user, wrong password) are
//! ordinary outcomes rather than errors; `Err` is reserved for store
//! failures.

use async_trait::async_trait;

use crate::domain::{Email, Error, InsertOutcome, LoginCredentials, NewUser, UpdateOutcome, User};

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The user was inserted.
    Registered(InsertOutcome),
    /// A user with the same email already exists; nothing was written.
    AlreadyRegistered,
}

impl RegistrationOutcome {
    /// Client-facing text for a rejected registration.
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            Self::Registered(_) => None,
            Self::AlreadyRegistered => Some("The user already registered"),
        }
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched and the login flag was set.
    LoggedIn {
        /// The stored user as read before the flag was updated.
        user: User,
        /// Outcome of setting `loggedIn`.
        result: UpdateOutcome,
    },
    /// No user has this email.
    UserNotFound,
    /// The password did not match; the login flag is untouched.
    PasswordMismatch,
}

impl LoginOutcome {
    /// Client-facing text for a rejected login.
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            Self::LoggedIn { .. } => None,
            Self::UserNotFound => Some("User not found"),
            Self::PasswordMismatch => Some("Password does not match"),
        }
    }
}

/// Domain use-case port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register `user` unless the email is taken.
    async fn register(&self, user: NewUser) -> Result<RegistrationOutcome, Error>;

    /// Check credentials and mark the user logged in.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;

    /// Mark every user with `email` logged out.
    async fn logout(&self, email: &Email) -> Result<UpdateOutcome, Error>;
}
