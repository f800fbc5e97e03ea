//! # API Error Types
//!
//! Error types for catalog requests.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  Before sending        On the wire            After the response        │
//! │  ──────────────        ───────────            ──────────────────        │
//! │  InvalidUrl            Connection             Status (non-2xx)          │
//! │  Validation            Http                   Decode                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::ValidationError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server could not be reached at all.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status.
    #[error("Catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Base URL is unusable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Request rejected locally before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// True for a 404 from the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
