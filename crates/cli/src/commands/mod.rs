//! Command implementations.
//!
//! Each command mutates or reads [`mycart_storefront::AppState`] and returns
//! the text to print, so the output can be checked without a terminal.

pub mod auth;
pub mod cart;
pub mod catalog;
