//! HTTP client module
//!
//! Provides the reqwest-backed transport used by collection iterators.
//!
//! # Features
//!
//! - **Dual transport**: one client serves blocking and async iteration
//! - **Authentication**: API key header plus arbitrary default headers
//! - **Status mapping**: non-2xx responses become `Error::HttpStatus`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, API_KEY_HEADER};

#[cfg(test)]
mod tests;
