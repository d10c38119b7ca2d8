//! Application state owned by the top-level context.
//!
//! The cart store and the identity service are constructed once here and
//! handed out by reference. Nothing in the crate reaches them through a
//! global.

use std::sync::Arc;

use mycart_core::{Product, ProductId};

use crate::cart::{CartNotice, CartStore};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::search::{self, FilterState};
use crate::services::auth::AuthService;
use crate::storage::{FileStorage, SharedStorage};

/// Application state for one shopper session.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
    auth: AuthService,
}

impl AppState {
    /// Create state over an explicit storage backend and catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: SharedStorage, catalog: Catalog) -> Self {
        let cart = CartStore::load(storage.clone(), config.inventory_policy);
        let auth = AuthService::load(storage, config.auth_delay);

        Self {
            config,
            catalog,
            cart,
            auth,
        }
    }

    /// Create state from configuration: file storage under the data
    /// directory, and the configured catalog file or the built-in sample.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a configured catalog file cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::sample(),
        };
        let storage: SharedStorage = Arc::new(FileStorage::new(&config.data_dir));
        tracing::info!(data_dir = %config.data_dir.display(), "Using file storage");

        Ok(Self::new(config, storage, catalog))
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthService {
        &mut self.auth
    }

    /// Look up a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }

    /// Products visible under `filter`, in display order.
    #[must_use]
    pub fn visible_products(&self, filter: &FilterState) -> Vec<&Product> {
        search::apply(self.catalog.products(), filter)
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product id.
    pub fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<Option<CartNotice>> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
        Ok(self.cart.add_many(product, quantity))
    }
}
