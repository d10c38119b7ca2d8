//! File-backed storage: one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{LocalStorage, StorageError};

/// Stores each record as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file that is renamed over the record, so
/// a record is either the previous value or the new one, never a partial write.
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        storage.set("mycart_items", "[]").unwrap();

        let on_disk = std::fs::read_to_string(tmp.path().join("nested/mycart_items.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert_eq!(storage.get("mycart_items").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_get_and_remove_missing_record() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path());

        assert!(storage.get("mycart_user").unwrap().is_none());
        storage.remove("mycart_user").unwrap();
    }

    #[test]
    fn test_overwrite_then_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path());

        storage.set("mycart_user", "{\"a\":1}").unwrap();
        storage.set("mycart_user", "{\"a\":2}").unwrap();
        assert_eq!(
            storage.get("mycart_user").unwrap().as_deref(),
            Some("{\"a\":2}")
        );
        assert!(!tmp.path().join("mycart_user.json.tmp").exists());

        storage.remove("mycart_user").unwrap();
        assert!(storage.get("mycart_user").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = FileStorage::new("unused");
        assert!(matches!(
            storage.get("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.set("", "x"), Err(StorageError::InvalidKey(_))));
    }
}
