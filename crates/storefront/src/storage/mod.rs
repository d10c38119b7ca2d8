//! Local durable storage for the storefront.
//!
//! The storefront keeps two independently keyed records, mirroring what a
//! browser would hold in `localStorage`:
//!
//! - [`keys::CART_ITEMS`] - JSON array of cart entries
//! - [`keys::CURRENT_USER`] - JSON identity of the signed-in user, absent when signed out
//!
//! Records are plain JSON text. There is no versioning and no migration; a
//! record that fails to parse is treated as absent by its owner.
//!
//! # Backends
//!
//! - [`FileStorage`] - one `<key>.json` file per key inside a data directory
//! - [`MemoryStorage`] - process-local map, used by tests and ephemeral sessions

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys for persisted records.
pub mod keys {
    /// Key for the serialized cart entry list.
    pub const CART_ITEMS: &str = "mycart_items";

    /// Key for the serialized signed-in user.
    pub const CURRENT_USER: &str = "mycart_user";
}

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded or decoded.
    #[error("malformed record under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot be used as a record name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// In-memory backend lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key/value store with whole-record reads and writes.
pub trait LocalStorage: Send + Sync {
    /// Read the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn LocalStorage>;

/// Read and decode a JSON record.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the record exists but does not decode.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON record.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}
