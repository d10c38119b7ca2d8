//! Order summary derived from the cart contents.

use rust_decimal::Decimal;
use serde::Serialize;

use mycart_core::{CurrencyCode, Price};

use super::CartEntry;

/// Estimated sales tax applied at checkout (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Totals shown on the cart page. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of price x quantity.
    pub subtotal: Price,
    pub estimated_tax: Price,
    /// Subtotal plus estimated tax.
    pub total: Price,
    pub free_shipping: bool,
}

impl CartSummary {
    pub(crate) fn from_entries(entries: &[CartEntry]) -> Self {
        let currency = entries
            .first()
            .map_or_else(CurrencyCode::default, |e| e.product.currency);

        let item_count = entries.iter().map(|e| u64::from(e.quantity)).sum();
        let subtotal = entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.line_total().amount));
        let estimated_tax = subtotal.saturating_mul(TAX_RATE);

        Self {
            item_count,
            subtotal: Price::new(subtotal, currency),
            estimated_tax: Price::new(estimated_tax, currency),
            total: Price::new(subtotal.saturating_add(estimated_tax), currency),
            free_shipping: subtotal >= FREE_SHIPPING_THRESHOLD,
        }
    }
}
