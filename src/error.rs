//! Error types for paged-collection
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Running out of items is not an error: manual stepping reports it as
//! [`Step::Done`](crate::collection::Step::Done) and the iterator/stream
//! surfaces simply end.

use thiserror::Error;

/// The main error type for paged-collection
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============================================================================
    // Response Shape Errors
    // ============================================================================
    #[error("Invalid response from '{path}': {message}")]
    InvalidResponse { path: String, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid response error for a collection path
    pub fn invalid_response(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::InvalidUrl(_) | Error::JsonParse(_)
        )
    }
}

/// Result type alias for paged-collection
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("invalid cursor");
        assert_eq!(err.to_string(), "Invalid argument: invalid cursor");

        let err = Error::invalid_response("/comments", "not a collection");
        assert_eq!(
            err.to_string(),
            "Invalid response from '/comments': not a collection"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::http_status(401, "").is_transport());
        assert!(Error::http_status(503, "").is_transport());
        assert!(Error::from(serde_json::from_str::<u8>("x").unwrap_err()).is_transport());

        assert!(!Error::invalid_argument("x").is_transport());
        assert!(!Error::invalid_response("/p", "x").is_transport());
        assert!(!Error::config("x").is_transport());
    }
}
