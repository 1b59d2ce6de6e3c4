// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the SOAP HTTP transport
//!
//! Request construction fails synchronously (bad URL, mistyped option).
//! Transport failures are forwarded to the caller unchanged. Response
//! normalization never fails.

use thiserror::Error;

/// Result type alias for soap-http operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for soap-http
#[derive(Error, Debug)]
pub enum Error {
    /// Target URL could not be parsed into scheme/host/path
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Option override carried a value of the wrong shape
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// HTTP request failed inside the reqwest transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by an injected transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Check if the failure came from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport(_))
    }

    /// Check if this is a timeout reported by reqwest
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the error was raised while building the request
    pub fn is_request_construction(&self) -> bool {
        matches!(self, Error::InvalidUrl { .. } | Error::InvalidOption { .. })
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::InvalidUrl { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
