//! Order history, held in memory and optionally saved to a storage slot.
//!
//! A persistent repository loads its orders from the slot (or the bundled
//! fixture when the slot is empty) and rewrites the whole list after every
//! create or status change, so orders outlive the process that placed them.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use shopflow_core::{NewOrder, Order, OrderId, OrderStatus, TrackingUpdate};

use super::{Latency, OrderRepository, RepositoryError, parse_fixture};
use crate::cart::{CartStorage, FileStorage};

const ORDERS_FIXTURE: &str = include_str!("../../fixtures/orders.json");

/// Storage key orders are saved under by [`InMemoryOrderRepository::persistent`].
pub const DEFAULT_ORDERS_KEY: &str = "shopflow-orders";

/// Days between placing an order and its delivery estimate.
const DELIVERY_ESTIMATE_DAYS: u64 = 7;

/// Order store shared between clones.
#[derive(Debug, Clone)]
pub struct InMemoryOrderRepository {
    book: Arc<RwLock<OrderBook>>,
    latency: Latency,
}

#[derive(Debug)]
struct OrderBook {
    orders: Vec<Order>,
    slot: Option<(FileStorage, String)>,
}

impl OrderBook {
    /// Save `orders` to the slot, if any, then make them current.
    ///
    /// On a failed write the current orders are left unchanged.
    fn replace(&mut self, orders: Vec<Order>) -> Result<(), RepositoryError> {
        if let Some((storage, key)) = &mut self.slot {
            let serialized = serde_json::to_string(&orders).map_err(|e| {
                RepositoryError::DataCorruption(format!("cannot serialize orders: {e}"))
            })?;
            storage.set(key, &serialized)?;
        }
        self.orders = orders;
        Ok(())
    }
}

impl InMemoryOrderRepository {
    /// Orders kept for the life of this value only.
    #[must_use]
    pub fn new(orders: Vec<Order>, latency: Latency) -> Self {
        Self::with_book(OrderBook { orders, slot: None }, latency)
    }

    fn with_book(book: OrderBook, latency: Latency) -> Self {
        Self {
            book: Arc::new(RwLock::new(book)),
            latency,
        }
    }

    /// Orders saved under `key` in `storage`, seeded from the bundled
    /// fixture while the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the slot cannot be read, or
    /// `RepositoryError::DataCorruption` if its contents do not parse.
    pub fn persistent(
        storage: FileStorage,
        key: impl Into<String>,
        latency: Latency,
    ) -> Result<Self, RepositoryError> {
        let key = key.into();
        let orders = match storage.get(&key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid saved orders in {key}: {e}"))
            })?,
            None => parse_fixture("orders", ORDERS_FIXTURE)?,
        };

        Ok(Self::with_book(
            OrderBook {
                orders,
                slot: Some((storage, key)),
            },
            latency,
        ))
    }

    /// Orders seeded from the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the fixture does not parse.
    pub fn from_fixtures(latency: Latency) -> Result<Self, RepositoryError> {
        Ok(Self::new(parse_fixture("orders", ORDERS_FIXTURE)?, latency))
    }
}

/// Fill in the repository-assigned fields of a new order.
fn assemble(id: OrderId, new: NewOrder, today: NaiveDate) -> Order {
    let estimated_delivery = today
        .checked_add_days(Days::new(DELIVERY_ESTIMATE_DAYS))
        .unwrap_or(today);

    Order {
        id,
        items: new.items,
        total: new.total,
        status: new.status,
        shipping_address: new.shipping_address,
        payment_method: new.payment_method,
        order_date: today,
        estimated_delivery,
        tracking_number: format!("TRK{:03}", id.as_i32()),
        tracking_updates: vec![TrackingUpdate {
            date: today,
            status: "Order Processed".to_string(),
            location: "Fulfillment Center".to_string(),
        }],
    }
}

impl OrderRepository for InMemoryOrderRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.latency.pause(300).await;
        Ok(self.book.read().await.orders.clone())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn get_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        self.latency.pause(200).await;
        self.book
            .read()
            .await
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Order {id}")))
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        self.latency.pause(500).await;

        let mut book = self.book.write().await;
        let next_id = book
            .orders
            .iter()
            .map(|o| o.id.as_i32())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let created = assemble(OrderId::new(next_id), order, Utc::now().date_naive());
        let mut orders = book.orders.clone();
        orders.push(created.clone());
        book.replace(orders)?;

        info!(order_id = %created.id, tracking = %created.tracking_number, "Order created");
        Ok(created)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, RepositoryError> {
        self.latency.pause(300).await;

        let mut book = self.book.write().await;
        let mut orders = book.orders.clone();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Order {id}")))?;
        order.status = status;
        let updated = order.clone();
        book.replace(orders)?;

        info!(status = %status, "Order status updated");
        Ok(updated)
    }
}

/// Sort key for order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    Date,
    Total,
    /// Alphabetical by status name.
    Status,
}

/// Filter and ordering for an order history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub sort: OrderSort,
    pub descending: bool,
}

impl Default for OrderQuery {
    /// Newest first, all statuses.
    fn default() -> Self {
        Self {
            status: None,
            sort: OrderSort::Date,
            descending: true,
        }
    }
}

impl OrderQuery {
    /// Filter and sort `orders`.
    #[must_use]
    pub fn apply(&self, mut orders: Vec<Order>) -> Vec<Order> {
        if let Some(status) = self.status {
            orders.retain(|o| o.status == status);
        }

        let compare = |a: &Order, b: &Order| -> Ordering {
            let primary = match self.sort {
                OrderSort::Date => a.order_date.cmp(&b.order_date),
                OrderSort::Total => a.total.cmp(&b.total),
                OrderSort::Status => a.status.as_str().cmp(b.status.as_str()),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        };

        if self.descending {
            orders.sort_by(|a, b| compare(b, a));
        } else {
            orders.sort_by(compare);
        }
        orders
    }

    /// Count orders per status, in lifecycle order.
    #[must_use]
    pub fn status_counts(orders: &[Order]) -> Vec<(OrderStatus, usize)> {
        OrderStatus::ALL
            .into_iter()
            .map(|status| (status, orders.iter().filter(|o| o.status == status).count()))
            .collect()
    }
}
