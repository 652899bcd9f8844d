//! JSON bodies exchanged by the HTTP handlers.
//!
//! Stored records are rendered as flat documents: `_id`, the typed key
//! fields, then every free-form attribute. Request bodies accept the same
//! flat shape; identifier keys supplied by clients are dropped by the domain
//! constructors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Attributes, Booking, DocumentId, Email, FilterOptions, House, UpdateOutcome, User,
};

/// Listing as returned to clients.
#[derive(Debug, Serialize)]
pub struct HouseBody<'a> {
    #[serde(rename = "_id")]
    id: &'a DocumentId,
    #[serde(rename = "houseOwner")]
    house_owner: &'a Email,
    #[serde(flatten)]
    attributes: &'a Attributes,
}

impl<'a> From<&'a House> for HouseBody<'a> {
    fn from(house: &'a House) -> Self {
        Self {
            id: house.id(),
            house_owner: house.house_owner(),
            attributes: house.attributes(),
        }
    }
}

/// Booking as returned to clients.
#[derive(Debug, Serialize)]
pub struct BookingBody<'a> {
    #[serde(rename = "_id")]
    id: &'a DocumentId,
    renter_email: &'a Email,
    #[serde(rename = "houseId")]
    house_id: &'a DocumentId,
    #[serde(flatten)]
    attributes: &'a Attributes,
}

impl<'a> From<&'a Booking> for BookingBody<'a> {
    fn from(booking: &'a Booking) -> Self {
        Self {
            id: booking.id(),
            renter_email: booking.renter_email(),
            house_id: booking.house_id(),
            attributes: booking.attributes(),
        }
    }
}

/// User as returned to clients. The password is never included.
#[derive(Debug, Serialize)]
pub struct UserBody<'a> {
    #[serde(rename = "_id")]
    id: &'a DocumentId,
    email: &'a Email,
    #[serde(rename = "loggedIn")]
    logged_in: bool,
    #[serde(flatten)]
    profile: &'a Attributes,
}

impl<'a> From<&'a User> for UserBody<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id(),
            email: user.email(),
            logged_in: user.logged_in(),
            profile: user.profile(),
        }
    }
}

/// Successful login payload: `{user, result}`.
#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub user: UserBody<'a>,
    pub result: &'a UpdateOutcome,
}

/// Distinct filter values keyed by field name.
#[derive(Debug, Serialize)]
pub struct FilterInfoBody<'a> {
    city: &'a [Value],
    bedrooms: &'a [Value],
    bathrooms: &'a [Value],
    kitchen: &'a [Value],
    room_size: &'a [Value],
}

impl<'a> From<&'a FilterOptions> for FilterInfoBody<'a> {
    fn from(options: &'a FilterOptions) -> Self {
        Self {
            city: &options.city,
            bedrooms: &options.bedrooms,
            bathrooms: &options.bathrooms,
            kitchen: &options.kitchen,
            room_size: &options.room_size,
        }
    }
}

/// Registration body: credentials, optional login flag, free-form profile.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default, rename = "loggedIn")]
    pub logged_in: Option<bool>,
    #[serde(flatten)]
    pub profile: Attributes,
}

/// Login body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Logout body.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub email: String,
}

/// Token request: the identity to embed plus any extra claim fields.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Token response.
#[derive(Debug, Serialize)]
pub struct TokenBody<'a> {
    pub token: &'a str,
}

/// New listing body.
#[derive(Debug, Deserialize)]
pub struct NewHouseRequest {
    #[serde(rename = "houseOwner")]
    pub house_owner: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// New booking body.
#[derive(Debug, Deserialize)]
pub struct NewBookingRequest {
    pub renter_email: String,
    #[serde(rename = "houseId")]
    pub house_id: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}
