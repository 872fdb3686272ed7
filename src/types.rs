//! Common types used throughout paged-collection
//!
//! Shared type aliases used by the transport, the iterator and the CLI.

use std::collections::HashMap;

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with a collection request
pub type StringMap = HashMap<String, String>;
