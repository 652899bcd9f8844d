//! House listings.
//!
//! A listing belongs to the user whose email is stored in `houseOwner`. Apart
//! from the owner, listing fields are free-form; the well-known ones are named
//! by the constants below because search and filtering read them.

use std::cmp::Ordering;

use serde_json::Value;

use super::{Attributes, DocumentId, Email, strip_reserved_fields};

/// Field holding the owner's email.
pub const HOUSE_OWNER_FIELD: &str = "houseOwner";
/// Fields matched by free-text search.
pub const SEARCHABLE_FIELDS: [&str; 3] = ["name", "city", "address"];
/// Fields whose distinct values populate the filter options.
pub const FILTER_FIELDS: [&str; 5] = ["city", "bedrooms", "bathrooms", "kitchen", "room_size"];

/// A stored listing.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    id: DocumentId,
    house_owner: Email,
    attributes: Attributes,
}

impl House {
    /// Reassemble a stored listing.
    pub fn new(id: DocumentId, house_owner: Email, attributes: Attributes) -> Self {
        Self {
            id,
            house_owner,
            attributes: strip_owner(strip_reserved_fields(attributes)),
        }
    }

    /// Store identifier.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Owner's email.
    pub fn house_owner(&self) -> &Email {
        &self.house_owner
    }

    /// Listing fields other than the identifier and owner.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a single listing field.
    pub fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Whether any searchable field contains `search` (case-insensitive).
    pub fn matches(&self, search: &SearchText) -> bool {
        SEARCHABLE_FIELDS.iter().any(|field| {
            self.attribute(field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(search.folded()))
        })
    }
}

/// A listing that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseDraft {
    house_owner: Email,
    attributes: Attributes,
}

impl HouseDraft {
    /// Build a draft; identifier and owner keys are removed from `attributes`.
    pub fn new(house_owner: Email, attributes: Attributes) -> Self {
        Self {
            house_owner,
            attributes: strip_owner(strip_reserved_fields(attributes)),
        }
    }

    /// Owner's email.
    pub fn house_owner(&self) -> &Email {
        &self.house_owner
    }

    /// Listing fields.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Promote the draft to a stored listing with `id`.
    pub fn into_house(self, id: DocumentId) -> House {
        House {
            id,
            house_owner: self.house_owner,
            attributes: self.attributes,
        }
    }
}

/// Partial update applied with `$set` semantics.
///
/// Identifier fields are dropped; `houseOwner` may be changed like any other
/// field and is stored trimmed so owner lookups match it exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseChanges(Attributes);

impl HouseChanges {
    /// Wrap client-supplied fields, dropping identifier keys.
    pub fn new(fields: Attributes) -> Self {
        let mut fields = strip_reserved_fields(fields);
        let owner = fields
            .get(HOUSE_OWNER_FIELD)
            .and_then(Value::as_str)
            .and_then(|raw| Email::new(raw).ok());
        if let Some(owner) = owner {
            fields.insert(
                HOUSE_OWNER_FIELD.to_owned(),
                Value::String(owner.as_ref().to_owned()),
            );
        }
        Self(fields)
    }

    /// Fields to set.
    pub fn fields(&self) -> &Attributes {
        &self.0
    }

    /// Whether the update sets nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New owner, when the update sets a usable `houseOwner`.
    ///
    /// A listing can only be created by an upsert when this is present.
    pub fn owner(&self) -> Option<Email> {
        self.0
            .get(HOUSE_OWNER_FIELD)
            .and_then(Value::as_str)
            .and_then(|raw| Email::new(raw).ok())
    }
}

/// Case-insensitive substring query.
///
/// The text is matched literally; adapters must escape any pattern
/// metacharacters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText {
    raw: String,
    folded: String,
}

impl SearchText {
    /// Wrap the raw query text (trimmed).
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim().to_owned();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// Text as supplied, trimmed.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Lower-cased text used for in-process matching.
    pub fn folded(&self) -> &str {
        self.folded.as_str()
    }

    /// Whether the query matches every listing.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Distinct values available for client-side filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Distinct `city` values.
    pub city: Vec<Value>,
    /// Distinct `bedrooms` values.
    pub bedrooms: Vec<Value>,
    /// Distinct `bathrooms` values.
    pub bathrooms: Vec<Value>,
    /// Distinct `kitchen` values.
    pub kitchen: Vec<Value>,
    /// Distinct `room_size` values.
    pub room_size: Vec<Value>,
}

impl FilterOptions {
    /// Build options from per-field value lists, deduplicating and sorting.
    pub fn from_values(
        mut lookup: impl FnMut(&'static str) -> Vec<Value>,
    ) -> Self {
        Self {
            city: distinct_sorted(lookup("city")),
            bedrooms: distinct_sorted(lookup("bedrooms")),
            bathrooms: distinct_sorted(lookup("bathrooms")),
            kitchen: distinct_sorted(lookup("kitchen")),
            room_size: distinct_sorted(lookup("room_size")),
        }
    }

    /// Collect options from an iterator of listings.
    pub fn collect<'a>(houses: impl IntoIterator<Item = &'a House> + Clone) -> Self {
        Self::from_values(|field| {
            houses
                .clone()
                .into_iter()
                .filter_map(|house| house.attribute(field).cloned())
                .collect()
        })
    }
}

fn strip_owner(mut attributes: Attributes) -> Attributes {
    attributes.remove(HOUSE_OWNER_FIELD);
    attributes
}

/// Order values: nulls, booleans, numbers (numerically), strings, then the
/// rest by their JSON text.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a)
            .cmp(&rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

fn distinct_sorted(mut values: Vec<Value>) -> Vec<Value> {
    values.retain(|value| !value.is_null());
    values.sort_by(compare_values);
    values.dedup();
    values
}
