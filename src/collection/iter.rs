//! Collection iterator
//!
//! [`CollectionIter`] walks a paginated collection one item at a time,
//! fetching the next page whenever its buffer runs dry. The same state
//! machine backs four surfaces:
//!
//! - [`Iterator`] (blocking, over a [`Transport`])
//! - [`CollectionIter::stream`] (async, over an [`AsyncTransport`])
//! - [`CollectionIter::next_step`] (blocking manual step)
//! - [`CollectionIter::next_step_async`] (async manual step)
//!
//! They all advance one shared cursor. Mixing them on one instance yields a
//! single merged sequence, not independent ones.
//!
//! Manual steps stay on the current page: once an item has been produced and
//! the buffer is drained, a step reports [`Step::Done`] even when the server
//! has more pages. The iterator and stream follow the server cursor until the
//! collection or the limit runs out.

use super::state::{PageRequest, PageState};
use super::types::{Batch, IteratorOptions, ResumeCursor, Step, CURSOR_PARAM, LIMIT_PARAM};
use crate::error::{Error, Result};
use crate::object::{FromRecord, Object};
use crate::transport::{AsyncTransport, Transport};
use crate::types::{JsonValue, StringMap};
use futures::stream::{self, Stream};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Iterator over a paginated collection endpoint
///
/// ```rust,ignore
/// let client = HttpClient::with_config(config)?;
/// let mut comments = client.iterator("/comments", IteratorOptions::new().batch_size(20).limit(200))?;
/// for comment in &mut comments {
///     println!("{}", comment?.id);
/// }
/// // Hand this to a new iterator to continue where this one stopped
/// let cursor = comments.cursor();
/// ```
pub struct CollectionIter<C, T = Object> {
    transport: C,
    path: String,
    params: StringMap,
    batch_size: usize,
    limit: Option<usize>,
    state: PageState,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T: FromRecord> CollectionIter<C, T> {
    /// Create an iterator over `path`
    ///
    /// No request is made until the first item is asked for.
    pub fn new(transport: C, path: impl Into<String>, options: IteratorOptions) -> Result<Self> {
        for reserved in [CURSOR_PARAM, LIMIT_PARAM] {
            if options.params.contains_key(reserved) {
                return Err(Error::invalid_argument(format!(
                    "do not pass \"{reserved}\" as a query parameter"
                )));
            }
        }

        let state = match options.cursor.as_deref() {
            Some(cursor) => PageState::resumed(cursor.parse::<ResumeCursor>()?),
            None => PageState::default(),
        };

        Ok(Self {
            transport,
            path: path.into(),
            params: options.params,
            batch_size: options.batch_size,
            limit: options.limit.filter(|&limit| limit > 0),
            state,
            _marker: PhantomData,
        })
    }

    /// Collection path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Page size hint (0 = server default)
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Overall item limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of items produced so far
    pub fn produced(&self) -> usize {
        self.state.produced()
    }

    /// Resumption cursor for the current position
    ///
    /// `None` until a page requested with a server cursor is current: before
    /// the first fetch of a fresh iterator and while on the collection's first
    /// page. Stays available after exhaustion, pointing past the last item.
    /// A position on the first page cannot be resumed; an iterator created
    /// without a cursor starts over from the first item.
    pub fn cursor(&self) -> Option<String> {
        self.state.resume_cursor().map(|cursor| cursor.to_string())
    }

    /// Query parameters the next page request will carry
    pub fn build_params(&self) -> StringMap {
        self.params_for(self.state.next_request().cursor.as_deref())
    }

    fn params_for(&self, cursor: Option<&str>) -> StringMap {
        let mut params = self.params.clone();
        if let Some(cursor) = cursor {
            params.insert(CURSOR_PARAM.to_string(), cursor.to_string());
        }
        if self.batch_size > 0 {
            params.insert(LIMIT_PARAM.to_string(), self.batch_size.to_string());
        }
        params
    }

    fn limit_reached(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.state.produced() >= limit)
    }

    /// End of a manual step sequence: limit hit or current page drained
    fn step_ends(&self) -> bool {
        self.limit_reached() || (self.state.buffered() == 0 && self.state.produced() > 0)
    }

    /// End of the full sequence: limit hit or no page left to fetch
    fn sequence_ends(&self) -> bool {
        self.limit_reached() || self.state.is_exhausted()
    }

    /// Install a fetched page; on error the state is left as it was
    fn load(&mut self, request: PageRequest, body: JsonValue) -> Result<()> {
        let batch = Batch::from_response(&self.path, body, request.skip)?;
        debug!(
            "Fetched page of {}: cursor={:?} skip={} items={} next={:?}",
            self.path,
            request.cursor,
            request.skip,
            batch.items.len(),
            batch.next_cursor
        );
        self.state.load(request, batch);
        Ok(())
    }

    fn take_buffered(&mut self) -> Option<T> {
        let record = self.state.pop()?;
        trace!("Producing item {} of {}", self.state.produced(), self.path);
        Some(T::from_record(record))
    }
}

// ============================================================================
// Blocking surfaces
// ============================================================================

impl<C: Transport, T: FromRecord> CollectionIter<C, T> {
    fn fetch(&mut self) -> Result<()> {
        let request = self.state.next_request();
        let params = self.params_for(request.cursor.as_deref());
        let body = self.transport.fetch_json(&self.path, &params)?;
        self.load(request, body)
    }

    /// Pop one item, fetching pages until one is buffered or the server runs out
    fn advance(&mut self) -> Result<Step<T>> {
        loop {
            if let Some(item) = self.take_buffered() {
                return Ok(Step::Item(item));
            }
            if self.state.is_exhausted() {
                return Ok(Step::Done);
            }
            self.fetch()?;
        }
    }

    /// Produce the next item of the current page
    ///
    /// Blocks on the transport for the first page. Returns [`Step::Done`]
    /// once the limit is reached or the current page is used up.
    pub fn next_step(&mut self) -> Result<Step<T>> {
        if self.state.is_fresh() {
            self.fetch()?;
        }
        if self.step_ends() {
            return Ok(Step::Done);
        }
        self.advance()
    }

    fn next_item(&mut self) -> Result<Step<T>> {
        if self.state.is_fresh() {
            self.fetch()?;
        }
        if self.sequence_ends() {
            return Ok(Step::Done);
        }
        self.advance()
    }
}

impl<C: Transport, T: FromRecord> Iterator for CollectionIter<C, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().map(Step::into_option).transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .limit
            .map(|limit| limit.saturating_sub(self.state.produced()));
        let buffered = remaining.map_or(self.state.buffered(), |r| r.min(self.state.buffered()));
        (buffered, remaining)
    }
}

impl<C: Transport, T: FromRecord> FusedIterator for CollectionIter<C, T> {}

// ============================================================================
// Async surfaces
// ============================================================================

impl<C: AsyncTransport, T: FromRecord> CollectionIter<C, T> {
    async fn fetch_async(&mut self) -> Result<()> {
        let request = self.state.next_request();
        let params = self.params_for(request.cursor.as_deref());
        let body = self.transport.fetch_json_async(&self.path, &params).await?;
        self.load(request, body)
    }

    async fn advance_async(&mut self) -> Result<Step<T>> {
        loop {
            if let Some(item) = self.take_buffered() {
                return Ok(Step::Item(item));
            }
            if self.state.is_exhausted() {
                return Ok(Step::Done);
            }
            self.fetch_async().await?;
        }
    }

    /// Produce the next item of the current page, suspending on the first fetch
    pub async fn next_step_async(&mut self) -> Result<Step<T>> {
        if self.state.is_fresh() {
            self.fetch_async().await?;
        }
        if self.step_ends() {
            return Ok(Step::Done);
        }
        self.advance_async().await
    }

    async fn next_item_async(&mut self) -> Result<Step<T>> {
        if self.state.is_fresh() {
            self.fetch_async().await?;
        }
        if self.sequence_ends() {
            return Ok(Step::Done);
        }
        self.advance_async().await
    }

    /// Remaining items as a stream
    ///
    /// The stream borrows the iterator and advances its cursor; dropping it
    /// and calling `stream()` again continues from the same position. The
    /// stream ends after yielding an error, leaving the iterator where the
    /// failed fetch found it.
    pub fn stream(&mut self) -> impl Stream<Item = Result<T>> + '_ {
        stream::try_unfold(self, |it| async move {
            let step = it.next_item_async().await?;
            Ok::<_, Error>(step.into_option().map(|item| (item, it)))
        })
    }
}

impl<C, T> std::fmt::Debug for CollectionIter<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionIter")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("batch_size", &self.batch_size)
            .field("limit", &self.limit)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
