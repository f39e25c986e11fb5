// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the shared tools
//!
//! Every recoverable failure is logged through the error path of the
//! [`LogSink`](crate::log::LogSink) and then handed back to the caller as an
//! `Err` that keeps its kind, so the log is never the only record of why an
//! operation failed.

use thiserror::Error;

/// Result type alias for tools operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the shared tools
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport answered with a non-2xx status
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Malformed JSON text or a body that does not fit the requested type
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cookie store rejected an assignment
    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Hash algorithm name not recognised
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// An injected callback was invoked before being installed
    #[error("Hook not installed: {0}")]
    HookMissing(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Error::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a cookie error
    pub fn cookie<S: Into<String>>(msg: S) -> Self {
        Error::Cookie(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this failure came from executing a request
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. } | Error::Url(_))
    }

    /// Check if this is a JSON parse failure
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }

    /// Check if a caller could reasonably retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Status { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = Error::status("https://api.live.bilibili.com/x", 503);

        assert!(err.is_transport());
        assert!(err.is_recoverable());
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.url(), Some("https://api.live.bilibili.com/x"));
    }

    #[test]
    fn test_client_status_not_recoverable() {
        let err = Error::status("https://example.com", 404);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_parse_error_kind() {
        let err: Error = serde_json::from_str::<serde_json::Value>("nope")
            .unwrap_err()
            .into();
        assert!(err.is_parse());
        assert!(!err.is_transport());
    }
}
