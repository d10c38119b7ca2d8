//! Integration tests for MyCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mycart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations persisted through file storage
//! - `filter_catalog` - Filter/sort engine over the sample catalog
//! - `auth_session` - Mock sign-in persisted across restarts
//!
//! Every test runs against its own temporary data directory, so tests can
//! run in parallel.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use mycart_storefront::AppState;
use mycart_storefront::cart::InventoryPolicy;
use mycart_storefront::config::StorefrontConfig;
use mycart_storefront::storage::{FileStorage, LocalStorage, SharedStorage};

/// A temporary data directory plus the configuration pointing at it.
pub struct TestContext {
    dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Fresh context with no auth delay and the default inventory policy.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            auth_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: InventoryPolicy) -> Self {
        self.config.inventory_policy = policy;
        self
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Storage over the context's data directory.
    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        Arc::new(FileStorage::new(self.dir.path()))
    }

    /// Build application state as the binary does on startup. Calling it
    /// again simulates a restart over the same data.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn start(&self) -> AppState {
        AppState::from_config(self.config.clone()).expect("build app state")
    }

    /// The raw stored record for `key`, parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the record cannot be read or is not JSON.
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<serde_json::Value> {
        self.storage()
            .get(key)
            .expect("read stored record")
            .map(|raw| serde_json::from_str(&raw).expect("stored record is JSON"))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
