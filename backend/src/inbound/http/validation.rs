//! Shared validation helpers for inbound HTTP adapters.
//!
//! Each helper turns a raw request value into a domain type or an
//! `invalid_request` error whose details name the offending field.

use pagination::{MAX_LIMIT, PageParams, PageRequest, PageRequestError};
use serde_json::{Value, json};

use crate::domain::{DocumentId, Email, Error, HOUSE_OWNER_FIELD, HouseChanges};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyField,
    InvalidType,
    OutOfRange,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::InvalidType => "invalid_type",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, ValidationCode::EmptyField, format!("{name} must not be empty"))
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value).map_err(|_| empty_field_error(field))
}

pub(crate) fn parse_document_id(value: &str, field: FieldName) -> Result<DocumentId, Error> {
    DocumentId::new(value).map_err(|_| empty_field_error(field))
}

/// Build a page window; limits above the maximum are clamped, not rejected.
pub(crate) fn parse_page(params: PageParams) -> Result<PageRequest, Error> {
    let params = PageParams {
        limit: params.limit.map(|limit| limit.min(MAX_LIMIT)),
        ..params
    };
    PageRequest::try_from(params).map_err(|err| {
        let field = match err {
            PageRequestError::LimitOutOfRange { .. } => FieldName::new("limit"),
            PageRequestError::OffsetOverflow { .. } => FieldName::new("page"),
        };
        field_error(field, ValidationCode::OutOfRange, err.to_string())
    })
}

/// Reject a `houseOwner` change that is not a non-empty string.
pub(crate) fn validate_owner_change(changes: &HouseChanges) -> Result<(), Error> {
    const FIELD: FieldName = FieldName::new(HOUSE_OWNER_FIELD);
    match changes.fields().get(HOUSE_OWNER_FIELD) {
        None => Ok(()),
        Some(Value::String(owner)) => parse_email(owner, FIELD).map(drop),
        Some(_) => Err(field_error(
            FIELD,
            ValidationCode::InvalidType,
            format!("{HOUSE_OWNER_FIELD} must be a string"),
        )),
    }
}
