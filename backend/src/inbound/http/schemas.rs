//! OpenAPI schema definitions for the HTTP payloads.
//!
//! Domain types stay free of `utoipa` derives. The wrappers below mirror the
//! JSON the handlers produce and accept; they are never constructed.

#![expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The document store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload for failed requests.
#[derive(ToSchema)]
#[schema(as = Error)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "email must not be empty")]
    message: String,
    #[schema(rename = "traceId", example = "00000000-0000-0000-0000-000000000000")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Fixed body of a request rejected by the auth gate.
#[derive(ToSchema)]
#[schema(as = Unauthorized)]
pub struct UnauthorizedSchema {
    #[schema(example = true)]
    error: bool,
    #[schema(example = "unauthorized access")]
    message: String,
}

/// Outcome of a single-document insert.
#[derive(ToSchema)]
#[schema(as = InsertOutcome, rename_all = "camelCase")]
pub struct InsertOutcomeSchema {
    acknowledged: bool,
    #[schema(example = "65f1c0ffee0000000000beef")]
    inserted_id: String,
}

/// Outcome of a single-document update.
#[derive(ToSchema)]
#[schema(as = UpdateOutcome, rename_all = "camelCase")]
pub struct UpdateOutcomeSchema {
    acknowledged: bool,
    matched_count: u64,
    modified_count: u64,
    upserted_id: Option<String>,
}

/// Outcome of a single-document delete.
#[derive(ToSchema)]
#[schema(as = DeleteOutcome, rename_all = "camelCase")]
pub struct DeleteOutcomeSchema {
    acknowledged: bool,
    deleted_count: u64,
}

/// Stored user. Extra profile fields are returned as-is.
#[derive(ToSchema)]
#[schema(as = User)]
pub struct UserSchema {
    #[schema(rename = "_id")]
    id: String,
    #[schema(example = "renter@example.com")]
    email: String,
    #[schema(rename = "loggedIn")]
    logged_in: bool,
}

/// Registration body. Extra profile fields are stored as-is.
#[derive(ToSchema)]
#[schema(as = NewUser)]
pub struct NewUserSchema {
    #[schema(example = "renter@example.com")]
    email: String,
    password: String,
    #[schema(rename = "loggedIn")]
    logged_in: Option<bool>,
}

/// Login body.
#[derive(ToSchema)]
#[schema(as = Login)]
pub struct LoginSchema {
    #[schema(example = "renter@example.com")]
    email: String,
    password: String,
}

/// Logout body.
#[derive(ToSchema)]
#[schema(as = Logout)]
pub struct LogoutSchema {
    #[schema(example = "renter@example.com")]
    email: String,
}

/// Successful login.
#[derive(ToSchema)]
#[schema(as = LoginResult)]
pub struct LoginResultSchema {
    user: UserSchema,
    result: UpdateOutcomeSchema,
}

/// Token request. Extra identity fields are embedded in the claim.
#[derive(ToSchema)]
#[schema(as = TokenRequest)]
pub struct TokenRequestSchema {
    #[schema(example = "renter@example.com")]
    email: String,
}

/// Issued access token.
#[derive(ToSchema)]
#[schema(as = Token)]
pub struct TokenSchema {
    token: String,
}

/// Stored listing. Extra fields are returned as-is.
#[derive(ToSchema)]
#[schema(as = House)]
pub struct HouseSchema {
    #[schema(rename = "_id")]
    id: String,
    #[schema(rename = "houseOwner", example = "owner@example.com")]
    house_owner: String,
    #[schema(example = "Lake View")]
    name: Option<String>,
    #[schema(example = "Dhaka")]
    city: Option<String>,
    address: Option<String>,
    bedrooms: Option<serde_json::Value>,
    bathrooms: Option<serde_json::Value>,
    kitchen: Option<serde_json::Value>,
    room_size: Option<serde_json::Value>,
}

/// Listing body for creation and partial updates.
#[derive(ToSchema)]
#[schema(as = NewHouse)]
pub struct NewHouseSchema {
    #[schema(rename = "houseOwner", example = "owner@example.com")]
    house_owner: String,
    name: Option<String>,
    city: Option<String>,
    address: Option<String>,
    bedrooms: Option<serde_json::Value>,
    bathrooms: Option<serde_json::Value>,
    kitchen: Option<serde_json::Value>,
    room_size: Option<serde_json::Value>,
}

/// Listing count.
#[derive(ToSchema)]
#[schema(as = TotalHouse)]
pub struct TotalHouseSchema {
    #[schema(rename = "totalHouse")]
    total_house: u64,
}

/// Distinct values of the filterable listing fields.
#[derive(ToSchema)]
#[schema(as = FilterInfo)]
pub struct FilterInfoSchema {
    city: Vec<serde_json::Value>,
    bedrooms: Vec<serde_json::Value>,
    bathrooms: Vec<serde_json::Value>,
    kitchen: Vec<serde_json::Value>,
    room_size: Vec<serde_json::Value>,
}

/// Stored booking. Extra fields are returned as-is.
#[derive(ToSchema)]
#[schema(as = Booking)]
pub struct BookingSchema {
    #[schema(rename = "_id")]
    id: String,
    #[schema(example = "renter@example.com")]
    renter_email: String,
    #[schema(rename = "houseId")]
    house_id: String,
}

/// Booking body.
#[derive(ToSchema)]
#[schema(as = NewBooking)]
pub struct NewBookingSchema {
    #[schema(example = "renter@example.com")]
    renter_email: String,
    #[schema(rename = "houseId", example = "65f1c0ffee0000000000beef")]
    house_id: String,
}
