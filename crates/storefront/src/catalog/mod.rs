//! Product catalog.
//!
//! The catalog is fixed at startup and read-only afterwards. It comes either
//! from the built-in demo data ([`Catalog::sample`]) or from a JSON file with
//! the same record layout ([`Catalog::from_json_file`]).

mod sample;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use mycart_core::{Category, Product, ProductId};

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an identifier.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A product has no images.
    #[error("product {0} has no images")]
    MissingImage(ProductId),
}

/// The full set of products and categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and every product has an image.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for duplicate ids or image-less products.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if product.images.is_empty() {
                return Err(CatalogError::MissingImage(product.id.clone()));
            }
        }
        Ok(Self {
            products,
            categories,
        })
    }

    /// The built-in demo catalog: 8 products across 8 categories.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            products: sample::products(),
            categories: sample::categories(),
        }
    }

    /// Load a catalog from a JSON file of the form `{"products": [...], "categories": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let parsed: Self = serde_json::from_str(&raw)?;
        let catalog = Self::new(parsed.products, parsed.categories)?;
        tracing::info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The first `limit` products in catalog order (home page "Trending Now").
    #[must_use]
    pub fn trending(&self, limit: usize) -> &[Product] {
        let end = limit.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    /// Category names in display order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}
