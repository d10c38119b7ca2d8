//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything that can fail while
//! starting up or serving a shopper action. Cart and filter operations have
//! no error path of their own; failures come from configuration, the catalog
//! source, storage, and the identity stub.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog source could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Message safe to show the shopper.
    ///
    /// Internal failures are reported generically; details go to the log.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Catalog(_) | Self::Storage(_) => {
                "Something went wrong, please try again".to_string()
            }
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_string(),
            Self::Auth(AuthError::EmptyName) => "Please enter your name".to_string(),
            Self::Auth(AuthError::Storage(_)) => "Could not sign you in".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product 42".to_string());
        assert_eq!(err.to_string(), "Not found: Product 42");

        let err = AppError::BadRequest("quantity must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be a number");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::from(StorageError::Poisoned);
        assert_eq!(err.user_message(), "Something went wrong, please try again");

        let err = AppError::from(AuthError::from(mycart_core::EmailError::MissingAtSymbol));
        assert_eq!(err.user_message(), "Invalid email address");

        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.user_message(), "Product not found");
    }
}
