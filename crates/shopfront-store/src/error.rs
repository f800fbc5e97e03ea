//! # Storage Error Types
//!
//! Error types for cart persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds path/key context                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore ← Logs it, records LoadStatus / SaveStatus                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart operation still succeeds (in-memory state is authoritative)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors.
///
/// `CartStore` never returns these from a cart operation; they surface only
/// through logs and the load/save status.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem read, write or rename failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key can't be mapped to a storage slot.
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The cart could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored snapshot is not a valid cart.
    ///
    /// ## When This Occurs
    /// - Snapshot is not JSON, or not an array of lines
    /// - A line has a negative or non-numeric price
    /// - File bytes are not UTF-8
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Injected or backend-specific failure.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an InvalidKey error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = StorageError::io(
            "/tmp/shopfront/cart.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/shopfront/cart.json"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_invalid_key_display() {
        let err = StorageError::invalid_key("../cart", "must not contain path separators");
        assert_eq!(
            err.to_string(),
            "Invalid storage key '../cart': must not contain path separators"
        );
    }
}
