//! # Store Configuration
//!
//! Where the cart snapshot lives.

use std::path::PathBuf;

use shopfront_core::CART_STORAGE_KEY;

use crate::error::StorageResult;
use crate::storage::FileStorage;

/// Cart store configuration.
///
/// ## Example
/// ```rust
/// use shopfront_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/shopfront").storage_key("cart");
/// assert_eq!(config.snapshot_path().to_str(), Some("/var/lib/shopfront/cart.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one `<key>.json` file per slot.
    pub data_dir: PathBuf,

    /// Slot name for the cart snapshot.
    /// Default: "cart"
    pub storage_key: String,
}

impl StoreConfig {
    /// Creates a new config with default settings.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Path of the snapshot file this config points at.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }

    /// Opens file storage rooted at `data_dir`, creating the directory.
    pub fn open_storage(&self) -> StorageResult<FileStorage> {
        FileStorage::open(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_cart_key() {
        let config = StoreConfig::new("/data");
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.snapshot_path(), PathBuf::from("/data/cart.json"));
    }

    #[test]
    fn test_builder_overrides_key() {
        let config = StoreConfig::new("/data").storage_key("wishlist");
        assert_eq!(config.snapshot_path(), PathBuf::from("/data/wishlist.json"));
    }
}
