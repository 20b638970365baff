//! ShopFlow Core - Shared types library.
//!
//! This crate provides common types used across all ShopFlow components:
//! - `storefront` - Cart state manager, catalog/order repositories, checkout
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks
//! beyond what callers pass in. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, selected options,
//!   and the product, category, order, and cart line records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
