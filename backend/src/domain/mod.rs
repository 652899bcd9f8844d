//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed records (users, houses, bookings), the
//! access token service, and the use-case services that inbound adapters
//! drive through the traits in [`ports`]. Nothing here knows about HTTP or
//! the document store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / House / Booking: stored records keyed by [`DocumentId`].
//! - TokenService: issues and verifies access tokens.
//! - AccountService / HouseService / BookingService: use-case services.

pub mod account_service;
pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod document;
pub mod error;
pub mod house;
pub mod house_service;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::booking::{
    Booking, BookingAdmission, BookingDraft, BookingRejection, HOUSE_ID_FIELD,
    MAX_BOOKINGS_PER_RENTER, RENTER_EMAIL_FIELD,
};
pub use self::booking_service::BookingService;
pub use self::document::{
    Attributes, DeleteOutcome, DocumentId, DocumentIdValidationError, InsertOutcome,
    RESERVED_ID_FIELDS, UpdateOutcome, strip_reserved_fields,
};
pub use self::error::{Error, ErrorCode};
pub use self::house::{
    FILTER_FIELDS, FilterOptions, HOUSE_OWNER_FIELD, House, HouseChanges, HouseDraft,
    SEARCHABLE_FIELDS, SearchText,
};
pub use self::house_service::HouseService;
pub use self::token::{
    ACCESS_TOKEN_TTL, AccessToken, AuthError, Claim, TokenSecret, TokenSecretError, TokenService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, EmailValidationError, NewUser, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use house_hunter::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
