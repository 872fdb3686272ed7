//! Domain objects built from collection records
//!
//! Every item of a collection is a JSON record. [`FromRecord`] turns such a
//! record into the type the caller iterates over. Decoding is total: a
//! malformed record still yields a value.

use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Conversion from a raw collection record
pub trait FromRecord: Sized {
    /// Build a value from one element of a response's `data` array
    fn from_record(record: JsonValue) -> Self;
}

/// Raw records pass through untouched
impl FromRecord for JsonValue {
    fn from_record(record: JsonValue) -> Self {
        record
    }
}

/// A typed API object
///
/// Records look like:
///
/// ```json
/// {
///   "type": "comment",
///   "id": "f-1234",
///   "attributes": { "text": "..." },
///   "context_attributes": { ... },
///   "relationships": { ... }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Object {
    /// Object identifier
    pub id: String,

    /// Object type (e.g. "comment", "file")
    #[serde(rename = "type")]
    pub object_type: String,

    /// Object attributes
    pub attributes: JsonObject,

    /// Attributes that depend on the collection the object was listed in
    #[serde(skip_serializing_if = "JsonObject::is_empty")]
    pub context_attributes: JsonObject,

    /// Related objects
    #[serde(skip_serializing_if = "JsonObject::is_empty")]
    pub relationships: JsonObject,
}

impl Object {
    /// Create an object with the given type and id
    pub fn new(object_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
            ..Default::default()
        }
    }

    /// Get an attribute by name
    pub fn get(&self, attribute: &str) -> Option<&JsonValue> {
        self.attributes.get(attribute)
    }
}

impl FromRecord for Object {
    fn from_record(record: JsonValue) -> Self {
        let JsonValue::Object(mut map) = record else {
            return Self::default();
        };

        Self {
            id: take_string(&mut map, "id"),
            object_type: take_string(&mut map, "type"),
            attributes: take_object(&mut map, "attributes"),
            context_attributes: take_object(&mut map, "context_attributes"),
            relationships: take_object(&mut map, "relationships"),
        }
    }
}

fn take_string(map: &mut JsonObject, key: &str) -> String {
    match map.remove(key) {
        Some(JsonValue::String(s)) => s,
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn take_object(map: &mut JsonObject, key: &str) -> JsonObject {
    match map.remove(key) {
        Some(JsonValue::Object(obj)) => obj,
        _ => JsonObject::new(),
    }
}
