//! Error type definitions for the M3U VOD addon

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Per-request configuration decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// HTML template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Playlist fetch errors
///
/// Every variant is a fetch failure as far as the resolver is concerned.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request exceeded the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Connection could not be established or was interrupted
    #[error("Connection failed: {url} - {message}")]
    Connection { url: String, message: String },

    /// The URL was rejected by the HTTP client
    #[error("Invalid URL: {url} - {message}")]
    InvalidUrl { url: String, message: String },

    /// The response body could not be read as text
    #[error("Failed to read body: {url} - {message}")]
    Body { url: String, message: String },
}

/// Per-request configuration decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The path segment is not valid percent-encoded UTF-8
    #[error("Invalid percent encoding: {0}")]
    Percent(#[from] std::string::FromUtf8Error),

    /// The segment looked like JSON but did not parse
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The segment is neither JSON nor an absolute http(s) URL
    #[error("Not a playlist URL: {value}")]
    NotAUrl { value: String },
}

impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create a non-success status error
    pub fn http<U: Into<String>>(status: u16, url: U) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Map a reqwest failure onto the matching variant
    pub fn from_reqwest<U: Into<String>>(url: U, err: &reqwest::Error) -> Self {
        let url = url.into();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                url,
            }
        } else if err.is_builder() {
            Self::InvalidUrl {
                url,
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            Self::Body {
                url,
                message: err.to_string(),
            }
        } else {
            Self::Connection {
                url,
                message: err.to_string(),
            }
        }
    }

    /// Whether the failure was caused by the fetch timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl DecodeError {
    /// Create a not-a-url error
    pub fn not_a_url<S: Into<String>>(value: S) -> Self {
        Self::NotAUrl {
            value: value.into(),
        }
    }
}
