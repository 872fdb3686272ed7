//! Collection module
//!
//! Cursor-based iteration over paginated collection endpoints.
//!
//! # Overview
//!
//! A collection endpoint answers with
//!
//! ```json
//! { "data": [ ... ], "meta": { "cursor": "..." } }
//! ```
//!
//! where `meta.cursor` is absent on the last page. [`CollectionIter`] follows
//! those cursors transparently and exposes its own resumption cursor
//! (`<server_cursor>-<offset>`) so a later iterator can continue exactly
//! where an earlier one stopped, even in the middle of a page.

mod iter;
mod state;
mod types;

pub use iter::CollectionIter;
pub use types::{Batch, IteratorOptions, ResumeCursor, Step, CURSOR_PARAM, LIMIT_PARAM};
