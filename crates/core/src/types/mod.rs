//! Core types for ShopFlow.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod options;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{CartLine, LineId};
pub use id::*;
pub use options::SelectedOptions;
pub use order::{NewOrder, Order, OrderItem, ShippingAddress, TrackingUpdate};
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product};
pub use status::*;
