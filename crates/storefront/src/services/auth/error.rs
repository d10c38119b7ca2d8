//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] mycart_core::EmailError),

    /// Display name is blank.
    #[error("name cannot be empty")]
    EmptyName,

    /// The identity record could not be written or removed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
