//! Key-value slots the cart is persisted into.
//!
//! A slot holds one serialized value under a string key. The cart manager is
//! the only writer, so there is no locking or conflict detection: the last
//! write wins.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key cannot be mapped to a slot.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A persistent key-value slot store.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the slot. Removing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot exists but cannot be deleted.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process slot store. Contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot before handing the store to a cart manager.
    #[must_use]
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a data directory.
///
/// Writes go to a sibling temp file that is then renamed over the slot, so a
/// reader never sees a partially written cart.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store slots under `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` unless the key is non-empty ASCII
    /// alphanumerics, `-`, `_`, or `.` (and not a dot-only name).
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.chars().all(|c| c == '.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(|e| io_error(&temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| io_error(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Wrote storage slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
        // Removing twice is fine
        storage.remove("cart").unwrap();
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get("shopflow-cart").unwrap(), None);

        storage.set("shopflow-cart", "[1]").unwrap();
        assert_eq!(storage.get("shopflow-cart").unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join("data/shopflow-cart.json").exists());
        assert!(!dir.path().join("data/shopflow-cart.json.tmp").exists());

        storage.set("shopflow-cart", "[2]").unwrap();
        assert_eq!(storage.get("shopflow-cart").unwrap().as_deref(), Some("[2]"));

        storage.remove("shopflow-cart").unwrap();
        assert_eq!(storage.get("shopflow-cart").unwrap(), None);
        storage.remove("shopflow-cart").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp/unused");
        for key in ["", "..", "../cart", "a/b", "cart key"] {
            assert!(
                matches!(storage.slot_path(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(storage.slot_path("shopflow-cart").is_ok());
    }
}
