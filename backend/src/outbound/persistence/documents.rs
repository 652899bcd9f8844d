//! Conversion between BSON documents and domain records.
//!
//! Free-form fields pass through as relaxed extended JSON, so an `ObjectId`
//! stored in an ordinary field reads back as `{"$oid": "..."}`.

use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde_json::Value;

use crate::domain::{Attributes, DocumentId, Email};

pub(super) const ID: &str = "_id";

/// Stored document split into identifier and remaining fields.
pub(super) struct Record {
    pub id: DocumentId,
    pub fields: Attributes,
}

impl Record {
    /// Split `document`; fails when `_id` is missing or not usable as an id.
    pub fn from_document(mut document: Document) -> Result<Self, String> {
        let id = document
            .remove(ID)
            .as_ref()
            .and_then(document_id)
            .ok_or_else(|| "stored document has no usable _id".to_owned())?;
        let fields = document
            .into_iter()
            .map(|(key, value)| (key, value.into_relaxed_extjson()))
            .collect();
        Ok(Self { id, fields })
    }

    /// Remove `key` and return it when it is a string.
    pub fn take_string(&mut self, key: &str) -> Option<String> {
        match self.fields.remove(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Remove `key` and parse it as an email.
    pub fn take_email(&mut self, key: &str) -> Result<Email, String> {
        match self.take_string(key).and_then(|raw| Email::new(raw).ok()) {
            Some(email) => Ok(email),
            None => Err(format!("document {} has no usable {key}", self.id)),
        }
    }
}

/// Parse a client-visible id as an `ObjectId`.
pub(super) fn object_id(id: &DocumentId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_ref()).ok()
}

/// Read an `_id` value; `ObjectId`s render as lowercase hex.
pub(super) fn document_id(value: &Bson) -> Option<DocumentId> {
    match value {
        Bson::ObjectId(oid) => DocumentId::new(oid.to_hex()).ok(),
        Bson::String(raw) => DocumentId::new(raw).ok(),
        _ => None,
    }
}

/// Encode free-form fields.
pub(super) fn to_document(attributes: &Attributes) -> Result<Document, String> {
    attributes
        .iter()
        .map(|(key, value)| {
            bson::to_bson(value)
                .map(|encoded| (key.clone(), encoded))
                .map_err(|err| format!("field {key}: {err}"))
        })
        .collect()
}

/// Inserted id as reported by the driver.
pub(super) fn inserted_id(value: &Bson) -> Result<DocumentId, String> {
    document_id(value).ok_or_else(|| format!("unexpected inserted id {value}"))
}
