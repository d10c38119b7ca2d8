//! Services for the storefront.
//!
//! # Services
//!
//! - `auth` - Mock identity (sign-in, sign-up, social sign-in, sign-out)

pub mod auth;
