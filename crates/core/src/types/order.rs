//! Order records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::options::SelectedOptions;
use super::status::OrderStatus;

/// One purchased line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A single carrier scan event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub date: NaiveDate,
    pub status: String,
    pub location: String,
}

/// Input for creating an order. The repository assigns everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    /// Grand total charged, including shipping and tax.
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub order_date: NaiveDate,
    pub estimated_delivery: NaiveDate,
    pub tracking_number: String,
    #[serde(default)]
    pub tracking_updates: Vec<TrackingUpdate>,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Most recent tracking event, if any.
    #[must_use]
    pub fn latest_tracking(&self) -> Option<&TrackingUpdate> {
        self.tracking_updates.iter().max_by_key(|update| update.date)
    }
}
