//! Cart commands.

use std::fmt::Write as _;

use mycart_core::{Price, ProductId};
use mycart_storefront::cart::{CartNotice, CartStore, FREE_SHIPPING_THRESHOLD};
use mycart_storefront::{AppError, AppState};

/// Cart lines followed by the order summary.
pub fn render_cart(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for entry in cart.entries() {
        let _ = writeln!(
            out,
            "{:>4}  {:>3} x {:<50}  {}",
            entry.product.id,
            entry.quantity,
            entry.product.title,
            entry.line_total()
        );
    }

    let summary = cart.summary();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Subtotal ({} items): {}",
        summary.item_count, summary.subtotal
    );
    let _ = writeln!(out, "Estimated tax:      {}", summary.estimated_tax);
    let _ = writeln!(out, "Total:              {}", summary.total);
    if summary.free_shipping {
        let _ = write!(out, "Shipping:           FREE");
    } else {
        let remaining = Price::new(
            FREE_SHIPPING_THRESHOLD - summary.subtotal.amount,
            summary.subtotal.currency_code,
        );
        let _ = write!(out, "Add {remaining} more for free shipping");
    }
    out
}

/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product id.
pub fn add(state: &mut AppState, id: &str, quantity: u32) -> Result<String, AppError> {
    let notice = state.add_to_cart(&ProductId::new(id), quantity)?;
    Ok(notice.map_or_else(|| "Nothing added".to_string(), |n| n.to_string()))
}

pub fn remove(state: &mut AppState, id: &str) -> String {
    state.cart_mut().remove(&ProductId::new(id)).to_string()
}

pub fn set(state: &mut AppState, id: &str, quantity: i64) -> String {
    let id = ProductId::new(id);
    match state.cart_mut().set_quantity(&id, quantity) {
        Some(notice) => notice.to_string(),
        None if state.cart().entry(&id).is_some() => CartNotice::QuantityUpdated.to_string(),
        None => format!("Product {id} is not in your cart"),
    }
}

pub fn clear(state: &mut AppState) -> String {
    state.cart_mut().clear().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;

    #[test]
    fn test_empty_cart() {
        let state = state();
        assert_eq!(render_cart(state.cart()), "Your cart is empty");
    }

    #[test]
    fn test_add_then_render_summary() {
        let mut state = state();
        assert_eq!(add(&mut state, "8", 2).unwrap(), "Updated quantity in cart");
        assert_eq!(add(&mut state, "5", 1).unwrap(), "Added to cart");

        let out = render_cart(state.cart());
        assert!(out.contains("2 x Wireless Gaming Mouse RGB"));
        assert!(out.contains("$159.98"));
        assert!(out.contains("Subtotal (3 items): $249.97"));
        assert!(out.contains("Estimated tax:      $25.00"));
        assert!(out.contains("Total:              $274.97"));
        assert!(out.ends_with("Shipping:           FREE"));
    }

    #[test]
    fn test_shipping_hint_below_threshold() {
        let mut state = state();
        let mut cheap = state.product(&ProductId::new("8")).unwrap().clone();
        cheap.price = rust_decimal::Decimal::new(1250, 2);
        state.cart_mut().add(&cheap);

        let out = render_cart(state.cart());
        assert!(out.ends_with("Add $37.50 more for free shipping"));
    }

    #[test]
    fn test_add_unknown_product() {
        let mut state = state();
        let err = add(&mut state, "99", 1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_set_remove_and_clear() {
        let mut state = state();
        add(&mut state, "3", 1).unwrap();

        assert_eq!(set(&mut state, "3", 4), "Updated quantity in cart");
        assert_eq!(state.cart().item_count(), 4);
        assert_eq!(set(&mut state, "3", 99), "Only 15 available");
        assert_eq!(set(&mut state, "42", 2), "Product 42 is not in your cart");
        assert_eq!(set(&mut state, "3", -1), "Removed from cart");
        assert!(state.cart().is_empty());

        add(&mut state, "1", 1).unwrap();
        assert_eq!(remove(&mut state, "1"), "Removed from cart");
        add(&mut state, "1", 1).unwrap();
        assert_eq!(clear(&mut state), "Cart cleared");
        assert!(state.cart().is_empty());
    }
}
