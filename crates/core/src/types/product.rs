//! Catalog records.
//!
//! These are read-only reference data supplied by the catalog at startup.
//! Field names serialize in camelCase so stored cart records keep the same
//! layout as the catalog source files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::{CurrencyCode, Price};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Unit price in the currency's standard unit.
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Image URLs, primary image first.
    pub images: Vec<String>,
    /// Category name, e.g. `"Electronics"`.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Average review score between 0 and 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind `rating`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    /// Units in stock; the most a shopper can put in the cart.
    pub inventory: u32,
    pub created_at: NaiveDate,
}

impl Product {
    /// Unit price with its currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency)
    }

    /// The primary image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Rating used for ordering; unrated products rank as 0.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A catalog category shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Category thumbnail URL.
    pub image: String,
}
