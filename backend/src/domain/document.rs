//! Store-facing primitives shared by every collection.
//!
//! Documents are addressed by an opaque [`DocumentId`]; the store adapter
//! decides its concrete representation. Mutations report their outcome with
//! the acknowledgement shapes clients already consume.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form document fields carried alongside the typed ones.
pub type Attributes = Map<String, Value>;

/// Field names that identify a document and must never be set by clients.
pub const RESERVED_ID_FIELDS: [&str; 2] = ["_id", "id"];

/// Validation errors for [`DocumentId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentIdValidationError {
    /// The identifier was blank once trimmed.
    #[error("document id must not be empty")]
    Empty,
}

/// Opaque document identifier.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed.
///
/// # Examples
/// ```
/// use house_hunter::domain::DocumentId;
///
/// let id = DocumentId::new(" 65f1c0ffee0000000000beef ").expect("valid id");
/// assert_eq!(id.as_ref(), "65f1c0ffee0000000000beef");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentIdValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DocumentIdValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

/// Result of inserting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Identifier generated for the new document.
    pub inserted_id: DocumentId,
}

impl InsertOutcome {
    /// Acknowledged insert of `inserted_id`.
    pub fn acknowledged(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of updating (or upserting) one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Documents matching the filter.
    pub matched_count: u64,
    /// Documents actually changed.
    pub modified_count: u64,
    /// Identifier of the document created by an upsert, if any.
    pub upserted_id: Option<DocumentId>,
}

/// Result of deleting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Documents removed (zero or one).
    pub deleted_count: u64,
}

/// Drop identifier fields from client-supplied attributes.
pub fn strip_reserved_fields(mut attributes: Attributes) -> Attributes {
    for field in RESERVED_ID_FIELDS {
        attributes.remove(field);
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(DocumentId::new(raw), Err(DocumentIdValidationError::Empty));
    }

    #[rstest]
    fn insert_outcome_uses_driver_field_names() {
        let id = DocumentId::new("h1").expect("valid id");
        let value = serde_json::to_value(InsertOutcome::acknowledged(id)).expect("serialise");
        assert_eq!(value, json!({ "acknowledged": true, "insertedId": "h1" }));
    }

    #[rstest]
    fn update_outcome_reports_null_upsert() {
        let outcome = UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        };
        let value = serde_json::to_value(outcome).expect("serialise");
        assert_eq!(value["upsertedId"], Value::Null);
        assert_eq!(value["matchedCount"], json!(0));
    }

    #[rstest]
    fn reserved_fields_are_stripped() {
        let attributes = json!({ "_id": "x", "id": "y", "city": "Dhaka" });
        let Value::Object(map) = attributes else {
            panic!("object literal");
        };
        let stripped = strip_reserved_fields(map);
        assert_eq!(Value::Object(stripped), json!({ "city": "Dhaka" }));
    }
}
