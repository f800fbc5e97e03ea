//! # CLI Error Type
//!
//! Unified error type for every subcommand.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Subcommand                                                            │
//! │  CliResult<T>                                                          │
//! │       │                                                                 │
//! │       ├── ApiError::Status(404) ──────► NOT_FOUND                       │
//! │       ├── ApiError::Connection ───────► NETWORK_ERROR                   │
//! │       ├── ValidationError ────────────► VALIDATION_ERROR                │
//! │       ├── StorageError ───────────────► STORAGE_ERROR                   │
//! │       └── bad config file / env ──────► CONFIG_ERROR                    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │  main: "error: [NOT_FOUND] Product not found: 404", exit code by kind  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never produce an error: a failed snapshot write is only
//! reported as a warning by the store.

use serde::Serialize;
use shopfront_api::ApiError;
use shopfront_core::{CoreError, ValidationError};
use shopfront_store::StorageError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Error returned from a subcommand.
///
/// ## Serialization
/// With `--json`, this is what ends up on stderr:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 404"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog returned 404
    NotFound,

    /// Input rejected before anything was sent
    ValidationError,

    /// Catalog unreachable or timed out
    NetworkError,

    /// Catalog answered with an unexpected status or body
    UpstreamError,

    /// Data directory could not be opened
    StorageError,

    /// Config file or environment is unusable
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::ConfigError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::NetworkError | ErrorCode::UpstreamError => 4,
            ErrorCode::StorageError => 5,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts catalog errors to CLI errors.
impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 404, .. } => {
                CliError::new(ErrorCode::NotFound, "Not found in catalog")
            }
            ApiError::Status { status, body } => {
                tracing::debug!(status, %body, "Catalog error body");
                CliError::new(
                    ErrorCode::UpstreamError,
                    format!("Catalog rejected the request ({status})"),
                )
            }
            ApiError::Connection(message) => CliError::new(ErrorCode::NetworkError, message),
            ApiError::Http(e) => {
                let code = if e.is_timeout() {
                    ErrorCode::NetworkError
                } else {
                    ErrorCode::UpstreamError
                };
                CliError::new(code, e.to_string())
            }
            ApiError::Decode(e) => {
                tracing::error!("Unexpected catalog response: {}", e);
                CliError::new(ErrorCode::UpstreamError, "Unexpected catalog response")
            }
            ApiError::InvalidUrl(e) => CliError::config(e),
            ApiError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => CliError::validation(other.to_string()),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for CliError {}
