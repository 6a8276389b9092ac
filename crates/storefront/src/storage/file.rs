//! Filesystem storage backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file and
//! are renamed into place so a crash never leaves a half-written cart.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::instrument;

use super::{CartStorage, validate_key};
use crate::error::StorageError;

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    /// Reject writes larger than `bytes`.
    #[must_use]
    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    /// Root directory of this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is not a safe file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), len = value.len()))]
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                len: value.len(),
                limit,
            });
        }

        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("medmart-storage-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_read_missing_file() {
        let storage = FileStorage::new(temp_dir());
        assert_eq!(storage.read("cart").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = temp_dir();
        let mut storage = FileStorage::new(&dir);
        storage.write("cart", "[]").unwrap();
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("cart.json").exists());
        assert!(!dir.join(".cart.json.tmp").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_rejects_path_traversal() {
        let mut storage = FileStorage::new(temp_dir());
        assert!(matches!(
            storage.write("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.read("a/b"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_quota() {
        let dir = temp_dir();
        let mut storage = FileStorage::new(&dir).with_quota(Some(2));
        assert!(matches!(
            storage.write("cart", "[1]"),
            Err(StorageError::QuotaExceeded { len: 3, limit: 2 })
        ));
        assert!(!dir.exists());
    }
}
