//! Pagination state shared by every consumption surface
//!
//! Holds the buffered page and the two positions that make up a resumption
//! cursor. It is only mutated after a fetch succeeded or when a buffered
//! record is handed out, so a failed request leaves it untouched.

use super::types::{Batch, ResumeCursor};
use crate::types::JsonValue;
use std::collections::VecDeque;

/// Parameters of the next page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRequest {
    /// Cursor to send, if any
    pub cursor: Option<String>,
    /// Records to drop from the front of the page
    pub skip: usize,
}

#[derive(Debug, Default)]
pub(crate) struct PageState {
    /// Records of the current page not yet produced
    buffer: VecDeque<JsonValue>,
    /// Items produced over the iterator's lifetime
    produced: usize,
    /// Cursor the current page was requested with
    page_cursor: Option<String>,
    /// Cursor of the next page, as returned by the server
    server_cursor: Option<String>,
    /// Records of the current page already produced (skipped ones included)
    page_offset: usize,
    /// Whether any page has been fetched
    fetched: bool,
}

impl PageState {
    /// State positioned at a resumption cursor; nothing is fetched yet
    pub fn resumed(cursor: ResumeCursor) -> Self {
        Self {
            page_cursor: Some(cursor.server_cursor),
            page_offset: cursor.offset,
            ..Default::default()
        }
    }

    /// Nothing fetched yet
    pub fn is_fresh(&self) -> bool {
        !self.fetched
    }

    /// Buffer drained and the server reported no further page
    pub fn is_exhausted(&self) -> bool {
        self.fetched && self.buffer.is_empty() && self.server_cursor.is_none()
    }

    pub fn produced(&self) -> usize {
        self.produced
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// What to ask the server for next
    ///
    /// Before the first fetch this re-requests the resumed page and skips
    /// the records consumed from it; afterwards it follows the server cursor.
    pub fn next_request(&self) -> PageRequest {
        if self.fetched {
            PageRequest {
                cursor: self.server_cursor.clone(),
                skip: 0,
            }
        } else {
            PageRequest {
                cursor: self.page_cursor.clone(),
                skip: self.page_offset,
            }
        }
    }

    /// Replace the buffer with a freshly fetched page
    pub fn load(&mut self, request: PageRequest, batch: Batch) {
        self.buffer = batch.items;
        self.server_cursor = batch.next_cursor;
        self.page_cursor = request.cursor;
        self.page_offset = request.skip;
        self.fetched = true;
    }

    /// Take the next buffered record, advancing both counters
    pub fn pop(&mut self) -> Option<JsonValue> {
        let record = self.buffer.pop_front()?;
        self.produced += 1;
        self.page_offset += 1;
        Some(record)
    }

    /// Position to resume from, if the current page is addressable
    pub fn resume_cursor(&self) -> Option<ResumeCursor> {
        self.page_cursor
            .as_ref()
            .map(|cursor| ResumeCursor::new(cursor.clone(), self.page_offset))
    }
}
