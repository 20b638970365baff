//! Storefront state shared across front-end handlers.

use std::sync::Arc;

use crate::cart::{CartManager, CartNotifier, FileStorage, TracingNotifier};
use crate::config::StorefrontConfig;
use crate::repository::{
    DEFAULT_ORDERS_KEY, InMemoryCategoryRepository, InMemoryOrderRepository,
    InMemoryProductRepository, RepositoryError,
};

/// Storefront state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the catalog and order repositories.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    products: InMemoryProductRepository,
    categories: InMemoryCategoryRepository,
    orders: InMemoryOrderRepository,
}

impl Storefront {
    /// Create the storefront, seeding repositories from the bundled fixtures.
    ///
    /// Orders are saved in the data directory next to the cart, so orders
    /// placed or updated by one run are visible to the next.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a fixture or the saved
    /// orders do not parse, or `RepositoryError::Storage` if the saved orders
    /// cannot be read.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, RepositoryError> {
        let latency = config.latency;
        let products = InMemoryProductRepository::from_fixtures(latency)?;
        let categories = InMemoryCategoryRepository::from_fixtures(latency)?;
        let orders = InMemoryOrderRepository::persistent(
            FileStorage::new(&config.data_dir),
            DEFAULT_ORDERS_KEY,
            latency,
        )?;

        tracing::debug!(
            data_dir = %config.data_dir.display(),
            simulate_latency = latency.is_enabled(),
            "Storefront initialized"
        );

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                products,
                categories,
                orders,
            }),
        })
    }

    /// Open the shopper's cart from the configured data directory.
    #[must_use]
    pub fn open_cart(&self) -> CartManager<FileStorage> {
        self.open_cart_with(TracingNotifier)
    }

    /// Open the shopper's cart, sending notices to `notifier`.
    #[must_use]
    pub fn open_cart_with<N: CartNotifier>(&self, notifier: N) -> CartManager<FileStorage, N> {
        let config = &self.inner.config;
        CartManager::open(
            FileStorage::new(&config.data_dir),
            config.cart_key.as_str(),
            notifier,
        )
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &InMemoryProductRepository {
        &self.inner.products
    }

    #[must_use]
    pub fn categories(&self) -> &InMemoryCategoryRepository {
        &self.inner.categories
    }

    #[must_use]
    pub fn orders(&self) -> &InMemoryOrderRepository {
        &self.inner.orders
    }
}
