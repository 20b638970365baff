//! Integration tests for ShopFlow.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopflow-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - File-backed carts across manager instances
//! - `cart_lifecycle` - Add, update, remove, and totals through a live catalog
//! - `checkout_flow` - Cart to placed order, and orders across storefront runs
//!
//! Every test runs against the bundled fixtures with simulated latency off
//! and its own temporary data directory.

use std::path::Path;

use shopflow_core::{Product, ProductId};
use shopflow_storefront::Storefront;
use shopflow_storefront::config::StorefrontConfig;
use shopflow_storefront::repository::{Latency, ProductRepository, RepositoryError};
use tempfile::TempDir;

/// A storefront rooted in a throwaway data directory.
pub struct TestContext {
    pub storefront: Storefront,
    dir: TempDir,
}

impl TestContext {
    /// Create a storefront over the bundled fixtures.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or a fixture is broken.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storefront = open_storefront(dir.path());

        Self { storefront, dir }
    }

    /// A second storefront over the same data directory, as a later CLI run
    /// would see it.
    ///
    /// # Panics
    ///
    /// Panics if the saved orders cannot be loaded.
    #[must_use]
    pub fn reopen(&self) -> Storefront {
        open_storefront(self.dir.path())
    }

    /// Directory the cart slot is written to.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Look up a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    pub async fn product(&self, id: i32) -> Result<Product, RepositoryError> {
        self.storefront
            .products()
            .get_by_id(ProductId::new(id))
            .await
    }
}

fn open_storefront(dir: &Path) -> Storefront {
    Storefront::from_config(StorefrontConfig {
        data_dir: dir.to_path_buf(),
        latency: Latency::none(),
        ..StorefrontConfig::default()
    })
    .expect("Failed to load fixtures")
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
