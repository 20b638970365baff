//! ShopFlow storefront library.
//!
//! Cart state management, catalog and order repositories, and checkout.
//! Front ends (the `shopflow` CLI, tests) build on this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod repository;
pub mod state;

pub use error::{AppError, Result};
pub use state::Storefront;
