//! Collection iteration types
//!
//! Options accepted at construction, the resumption cursor format, the
//! outcome of a manual step and the decoded shape of one fetched page.

use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Query parameter carrying the server cursor
pub const CURSOR_PARAM: &str = "cursor";

/// Query parameter carrying the batch size
pub const LIMIT_PARAM: &str = "limit";

// ============================================================================
// Iterator Options
// ============================================================================

/// Construction-time options for a collection iterator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IteratorOptions {
    /// Page size hint sent as `limit` (0 = server default)
    pub batch_size: usize,
    /// Cap on the total number of items produced (`None` or 0 = unbounded)
    pub limit: Option<usize>,
    /// Resumption cursor returned by a previous iterator
    pub cursor: Option<String>,
    /// Extra query parameters sent with every request
    pub params: StringMap,
}

impl IteratorOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size hint
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the overall item limit
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume from a cursor
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Add a fixed query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Resumption Cursor
// ============================================================================

/// Position inside a collection: a server page cursor plus the number of
/// records of that page already consumed.
///
/// Serialized as `<server_cursor>-<offset>`. Parsing splits on the last `-`,
/// so the server part may itself contain dashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeCursor {
    /// Cursor the page was requested with
    pub server_cursor: String,
    /// Records of that page already produced
    pub offset: usize,
}

impl ResumeCursor {
    /// Create a new resumption cursor
    pub fn new(server_cursor: impl Into<String>, offset: usize) -> Self {
        Self {
            server_cursor: server_cursor.into(),
            offset,
        }
    }
}

impl FromStr for ResumeCursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (server_cursor, offset) = s
            .rsplit_once('-')
            .ok_or_else(|| Error::invalid_argument("invalid cursor"))?;

        if server_cursor.is_empty() {
            return Err(Error::invalid_argument("invalid cursor"));
        }

        let offset = offset
            .parse()
            .map_err(|_| Error::invalid_argument("invalid cursor"))?;

        Ok(Self::new(server_cursor, offset))
    }
}

impl fmt::Display for ResumeCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.server_cursor, self.offset)
    }
}

// ============================================================================
// Step
// ============================================================================

/// Outcome of a manual step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The next item of the collection
    Item(T),
    /// The collection (or the configured limit) is exhausted
    Done,
}

impl<T> Step<T> {
    /// Check if this is the end of the sequence
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Convert into an `Option`, `Done` becoming `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Done => None,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(item: Option<T>) -> Self {
        item.map_or(Self::Done, Self::Item)
    }
}

// ============================================================================
// Batch
// ============================================================================

/// One fetched page, independent of how the request was made
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Raw records, already advanced past the skipped ones
    pub items: VecDeque<JsonValue>,
    /// `meta.cursor` of the response; `None` on the last page
    pub next_cursor: Option<String>,
}

impl Batch {
    /// Decode a response envelope `{"data": [...], "meta": {"cursor": ...}}`
    ///
    /// The first `skip` records are dropped. Fails if `data` is missing or is
    /// not an array.
    pub fn from_response(path: &str, body: JsonValue, skip: usize) -> Result<Self> {
        let JsonValue::Object(mut envelope) = body else {
            return Err(Error::invalid_response(path, "response is not a JSON object"));
        };

        let data = match envelope.remove("data") {
            Some(JsonValue::Array(data)) => data,
            _ => return Err(Error::invalid_response(path, "not a collection")),
        };

        let next_cursor = envelope
            .get("meta")
            .and_then(|meta| meta.get(CURSOR_PARAM))
            .and_then(JsonValue::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(String::from);

        Ok(Self {
            items: data.into_iter().skip(skip).collect(),
            next_cursor,
        })
    }
}
