//! Transport traits
//!
//! The iterator never talks HTTP directly. It asks a transport for the JSON
//! body of `path` with a set of query parameters, either blocking the calling
//! thread ([`Transport`]) or suspending the current task ([`AsyncTransport`]).
//! Implementations must surface their failures unmodified; the iterator
//! propagates them without retrying.

use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use std::sync::Arc;

/// Blocking JSON fetch
pub trait Transport {
    /// Fetch and decode the JSON body of `path` with `params` as query string
    fn fetch_json(&self, path: &str, params: &StringMap) -> Result<JsonValue>;
}

/// Suspending JSON fetch with the same result contract as [`Transport`]
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Fetch and decode the JSON body of `path` with `params` as query string
    async fn fetch_json_async(&self, path: &str, params: &StringMap) -> Result<JsonValue>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch_json(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        (**self).fetch_json(path, params)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fetch_json(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        (**self).fetch_json(path, params)
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for &T {
    async fn fetch_json_async(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        (**self).fetch_json_async(path, params).await
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn fetch_json_async(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        (**self).fetch_json_async(path, params).await
    }
}
