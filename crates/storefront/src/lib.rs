//! MyCart Storefront library.
//!
//! The storefront core behind the shop's presentation layer:
//!
//! - [`catalog`] - Read-only product and category data
//! - [`cart`] - Cart store with derived totals, persisted to local storage
//! - [`search`] - Filter/sort engine over the catalog
//! - [`services::auth`] - Mock identity (sign-in, sign-up, sign-out)
//! - [`storage`] - Local key/value storage backends
//! - [`state`] - Top-level application state owning the stores
//!
//! Cart and filter state are independent; neither reads the other.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
