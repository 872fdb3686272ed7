//! HTTP transport backed by reqwest
//!
//! Provides the default [`Transport`] / [`AsyncTransport`] implementation:
//! - Base URL joining for collection paths
//! - API key and default headers on every request
//! - Status classification into [`Error::HttpStatus`]
//!
//! Failures are returned as-is; nothing is retried at this layer.

use crate::collection::{CollectionIter, IteratorOptions};
use crate::error::{Error, Result};
use crate::object::Object;
use crate::transport::{AsyncTransport, Transport};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-apikey";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// API key sent in the `x-apikey` header
    pub api_key: Option<String>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            api_key: None,
            default_headers: HashMap::new(),
            user_agent: format!("paged-collection/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client usable as both a blocking and an async transport
///
/// The blocking reqwest client is only created on first blocking use, so an
/// `HttpClient` that is only driven asynchronously can live inside a tokio
/// runtime. Once the blocking client exists, the `HttpClient` must not be
/// dropped from within an async context.
pub struct HttpClient {
    client: Client,
    blocking: OnceCell<reqwest::blocking::Client>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            blocking: OnceCell::new(),
            config,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Iterate over the collection at `path`, decoding records as [`Object`]
    pub fn iterator(
        &self,
        path: impl Into<String>,
        options: IteratorOptions,
    ) -> Result<CollectionIter<&Self, Object>> {
        CollectionIter::new(self, path, options)
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client> {
        self.blocking.get_or_try_init(|| {
            reqwest::blocking::Client::builder()
                .timeout(self.config.timeout)
                .user_agent(&self.config.user_agent)
                .build()
                .map_err(Error::Http)
        })
    }

    /// Headers applied to every request
    fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.config
            .default_headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(
                self.config
                    .api_key
                    .as_deref()
                    .map(|key| (API_KEY_HEADER, key)),
            )
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl Transport for HttpClient {
    fn fetch_json(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        let url = self.build_url(path);
        let mut req = self.blocking_client()?.get(&url);

        for (key, value) in self.headers() {
            req = req.header(key, value);
        }

        if !params.is_empty() {
            req = req.query(params);
        }

        let response = req.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", url);
        Ok(response.json()?)
    }
}

#[async_trait]
impl AsyncTransport for HttpClient {
    async fn fetch_json_async(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        let url = self.build_url(path);
        let mut req = self.client.get(&url);

        for (key, value) in self.headers() {
            req = req.header(key, value);
        }

        if !params.is_empty() {
            req = req.query(params);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", url);
        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("has_api_key", &self.config.api_key.is_some())
            .field("has_blocking_client", &self.blocking.get().is_some())
            .finish_non_exhaustive()
    }
}
