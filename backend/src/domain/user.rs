//! User identity records.
//!
//! A user is identified by their email address, the business key used by
//! registration, login, listings (`houseOwner`), and bookings
//! (`renter_email`).

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Attributes, DocumentId};

/// Validation errors for [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// The address was blank once trimmed.
    #[error("email must not be empty")]
    Empty,
}

/// Email address used as the user's business key.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed. No further syntax checks are
///   applied and comparisons are exact.
///
/// # Examples
/// ```
/// use house_hunter::domain::Email;
///
/// let email = Email::new("  renter@example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "renter@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and wrap a raw address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Registration payload for a user that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: Email,
    password: Zeroizing<String>,
    logged_in: bool,
    profile: Attributes,
}

impl NewUser {
    /// Build a registration payload. Users start logged out.
    pub fn new(email: Email, password: impl Into<String>, profile: Attributes) -> Self {
        Self {
            email,
            password: Zeroizing::new(password.into()),
            logged_in: false,
            profile,
        }
    }

    /// Override the initial login flag supplied by the client.
    #[must_use]
    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    /// Business key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password as supplied at registration.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Initial login flag.
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Free-form profile fields.
    pub fn profile(&self) -> &Attributes {
        &self.profile
    }

    /// Promote the payload to a stored user with `id`.
    pub fn into_user(self, id: DocumentId) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            logged_in: self.logged_in,
            profile: self.profile,
        }
    }
}

/// Stored user record.
///
/// The password is kept in a zeroising buffer and has no serialisation path;
/// adapters decide what to expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: DocumentId,
    email: Email,
    password: Zeroizing<String>,
    logged_in: bool,
    profile: Attributes,
}

impl User {
    /// Reassemble a stored record.
    pub fn new(
        id: DocumentId,
        email: Email,
        password: impl Into<String>,
        logged_in: bool,
        profile: Attributes,
    ) -> Self {
        Self {
            id,
            email,
            password: Zeroizing::new(password.into()),
            logged_in,
            profile,
        }
    }

    /// Store identifier.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Business key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether the user is currently logged in.
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Free-form profile fields.
    pub fn profile(&self) -> &Attributes {
        &self.profile
    }

    /// Copy of the record with the login flag replaced.
    #[must_use]
    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }
}
