//! # paged-collection
//!
//! Resumable, cursor-based iteration over paginated HTTP collection
//! endpoints.
//!
//! ## Features
//!
//! - **Transparent paging**: pages are fetched lazily as the buffer drains
//! - **Blocking and async**: `Iterator`, `Stream` and manual stepping over one cursor
//! - **Exact resumption**: a `<server_cursor>-<offset>` token resumes mid-page
//! - **Limits**: page size hint and an overall item cap
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use paged_collection::{HttpClient, HttpClientConfig, IteratorOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("https://www.virustotal.com/api/v3")
//!         .api_key("<apikey>")
//!         .build();
//!     let client = HttpClient::with_config(config)?;
//!
//!     let options = IteratorOptions::new().batch_size(20).limit(200);
//!     let mut comments = client.iterator("/comments", options)?;
//!     let mut stream = Box::pin(comments.stream());
//!     while let Some(comment) = stream.try_next().await? {
//!         println!("{}", comment.id);
//!     }
//!     drop(stream);
//!
//!     // Continue later from exactly this point
//!     println!("{:?}", comments.cursor());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      CollectionIter                       │
//! │  Iterator   stream()   next_step()   next_step_async()    │
//! └───────────────────────────┬───────────────────────────────┘
//!                             │ one shared PageState
//!              ┌──────────────┴──────────────┐
//!   ┌──────────┴──────────┐       ┌──────────┴──────────┐
//!   │ Transport /         │       │ FromRecord          │
//!   │ AsyncTransport      │       │ (Object, JsonValue) │
//!   │ (HttpClient)        │       │                     │
//!   └─────────────────────┘       └─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Transport traits consumed by iterators
pub mod transport;

/// Default reqwest-based transport
pub mod http;

/// Domain objects and record decoding
pub mod object;

/// Collection iterators
pub mod collection;

/// Client settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use collection::{CollectionIter, IteratorOptions, ResumeCursor, Step};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig};
pub use object::{FromRecord, Object};
pub use transport::{AsyncTransport, Transport};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
