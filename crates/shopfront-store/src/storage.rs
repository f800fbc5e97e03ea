//! # Key-Value Storage
//!
//! The durable slot the cart snapshot lives in.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStorage (trait)                             │
//! │                                                                         │
//! │   read(key)  ──► Ok(Some(text)) | Ok(None) when absent | Err            │
//! │   write(key, text) ──► replaces the whole value                         │
//! │                                                                         │
//! │   ┌─────────────────────────┐      ┌─────────────────────────┐         │
//! │   │      FileStorage        │      │     MemoryStorage       │         │
//! │   │  <dir>/<key>.json       │      │  HashMap<String,String> │         │
//! │   │  temp file + rename     │      │  tests and embedding    │         │
//! │   └─────────────────────────┘      └─────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Replace
//! `FileStorage::write` writes `.<key>.<uuid>.tmp` in the same directory,
//! flushes it, then renames it over `<key>.json`. A reader sees either the
//! old snapshot or the new one, never a partial file.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Trait
// =============================================================================

/// A string-valued slot store.
///
/// Implementations are synchronous: `write` has finished (or failed) by the
/// time it returns.
pub trait KeyValueStorage {
    /// Reads the value under `key`. Absent keys are `Ok(None)`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One UTF-8 JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        debug!(dir = %dir.display(), "File storage opened");
        Ok(FileStorage { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::InvalidSnapshot(format!("{}: {e}", path.display())))
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));

        let result = write_synced(&tmp, value).and_then(|()| {
            fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))
        });

        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp) {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %e, "Failed to remove temp file");
                }
            }
        }

        result
    }
}

fn write_synced(path: &Path, value: &str) -> StorageResult<()> {
    let mut file = fs::File::create(path).map_err(|e| StorageError::io(path, e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| StorageError::io(path, e))?;
    file.sync_all().map_err(|e| StorageError::io(path, e))
}

/// Keys become file names, so they must stay inside the data directory.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key(key, "must not be empty"));
    }
    if key.starts_with('.') {
        return Err(StorageError::invalid_key(key, "must not start with '.'"));
    }
    if key.contains(['/', '\\']) || key.contains('\0') {
        return Err(StorageError::invalid_key(
            key,
            "must not contain path separators",
        ));
    }
    Ok(())
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
