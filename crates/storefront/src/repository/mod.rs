//! Catalog and order repositories.
//!
//! # Consistency scope
//!
//! The repositories are in-process and in-memory. They are seeded from the
//! JSON fixtures under `crates/storefront/fixtures/` and every call sleeps
//! for a simulated network delay (see [`Latency`]). Writes (order creation,
//! status updates) are visible to later calls on the same repository value
//! and to its clones, never across processes.
//!
//! Callers depend on the traits so a real backend can be swapped in.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::cart::StorageError;

use shopflow_core::{
    Category, CategoryId, NewOrder, Order, OrderId, OrderStatus, Product, ProductId,
};

mod categories;
mod orders;
mod products;

pub use categories::InMemoryCategoryRepository;
pub use orders::{DEFAULT_ORDERS_KEY, InMemoryOrderRepository, OrderQuery, OrderSort};
pub use products::{InMemoryProductRepository, ProductFilter};

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Seed data could not be parsed.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Saved orders could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Simulated network delay applied to every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    /// Sleep for each call's configured delay.
    #[must_use]
    pub const fn simulated() -> Self {
        Self { enabled: true }
    }

    /// Return immediately. Used by tests.
    #[must_use]
    pub const fn none() -> Self {
        Self { enabled: false }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) async fn pause(self, millis: u64) {
        if self.enabled {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

/// Product lookups.
pub trait ProductRepository: Send + Sync {
    /// Every product in the catalog.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// A single product.
    ///
    /// Fails with [`RepositoryError::NotFound`] for unknown ids.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Products whose category name equals `category`.
    fn get_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Case-insensitive free-text search over name, description, category, and brand.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Products matching every set field of `filter`.
    fn get_filtered(
        &self,
        filter: &ProductFilter,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Highly rated products for the home page.
    fn get_featured(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Other products in the same category as `id`; empty for unknown ids.
    fn get_related(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;
}

/// Category lookups.
pub trait CategoryRepository: Send + Sync {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Category, RepositoryError>> + Send;
}

/// Order history and placement.
pub trait OrderRepository: Send + Sync {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Order>, RepositoryError>> + Send;

    fn get_by_id(&self, id: OrderId)
    -> impl Future<Output = Result<Order, RepositoryError>> + Send;

    /// Persist a new order, assigning its id, dates, and tracking number.
    fn create(&self, order: NewOrder) -> impl Future<Output = Result<Order, RepositoryError>> + Send;

    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> impl Future<Output = Result<Order, RepositoryError>> + Send;
}

/// Parse a JSON fixture, reporting which one was broken.
fn parse_fixture<T: serde::de::DeserializeOwned>(
    name: &str,
    raw: &str,
) -> Result<Vec<T>, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid {name} fixture: {e}")))
}
