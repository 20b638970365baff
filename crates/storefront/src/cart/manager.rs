//! The cart state manager.
//!
//! Owns the authoritative in-memory cart, hydrates it once from a storage
//! slot, and writes it back through [`CartManager::commit`] at the end of
//! every mutation.

use rust_decimal::Decimal;
use shopflow_core::{CartLine, Product, ProductId, SelectedOptions};

use super::notice::{CartNotice, CartNotifier, TracingNotifier};
use super::storage::CartStorage;
use super::summary::OrderSummary;

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "shopflow-cart";

/// Shopping cart backed by a persistent slot.
///
/// Lines are matched on `(product id, selected options)`. All operations are
/// synchronous and never fail from the caller's point of view: unreadable
/// saved data hydrates to an empty cart, and failed writes are logged while
/// the in-memory cart stays authoritative.
///
/// # Example
///
/// ```rust,ignore
/// let mut cart = CartManager::new(MemoryStorage::new());
/// cart.add(&product, 2, SelectedOptions::new());
/// assert_eq!(cart.total_items(), 2);
/// ```
pub struct CartManager<S, N = TracingNotifier> {
    storage: S,
    notifier: N,
    key: String,
    lines: Vec<CartLine>,
}

impl<S: CartStorage> CartManager<S, TracingNotifier> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`], logging notices.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::open(storage, DEFAULT_CART_KEY, TracingNotifier)
    }
}

impl<S: CartStorage, N: CartNotifier> CartManager<S, N> {
    /// Open the cart stored under `key`.
    ///
    /// Hydration completes before this returns, so nothing can write an empty
    /// cart over saved data.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>, notifier: N) -> Self {
        let key = key.into();
        let lines = hydrate(&storage, &key);
        tracing::debug!(key = %key, lines = lines.len(), "Cart hydrated");

        Self {
            storage,
            notifier,
            key,
            lines,
        }
    }

    /// Add `quantity` units of `product` with the given options.
    ///
    /// Increments the matching line if one exists, otherwise appends a new
    /// line holding a snapshot of `product`. Adding zero units does nothing.
    pub fn add(&mut self, product: &Product, quantity: u32, selected_options: SelectedOptions) {
        if quantity == 0 {
            tracing::debug!(product_id = %product.id, "Ignoring add of zero units");
            return;
        }

        let notice = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product.id, &selected_options))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            CartNotice::QuantityUpdated {
                product_name: product.name.clone(),
                new_quantity: line.quantity,
            }
        } else {
            self.lines
                .push(CartLine::new(product.clone(), quantity, selected_options));
            CartNotice::ItemAdded {
                product_name: product.name.clone(),
                quantity,
            }
        };

        tracing::info!(product_id = %product.id, quantity, "Added to cart");
        self.notifier.notify(&notice);
        self.commit();
    }

    /// Add a single unit with no options.
    pub fn add_one(&mut self, product: &Product) {
        self.add(product, 1, SelectedOptions::new());
    }

    /// Remove the line for `product_id` + `selected_options`.
    ///
    /// Returns `false` (and leaves the cart and its slot untouched) when
    /// nothing matched.
    pub fn remove(&mut self, product_id: ProductId, selected_options: &SelectedOptions) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| !line.matches(product_id, selected_options));

        if self.lines.len() == before {
            return false;
        }

        tracing::info!(product_id = %product_id, "Removed from cart");
        self.notifier
            .notify(&CartNotice::ItemRemoved { product_id });
        self.commit();
        true
    }

    /// Set the matching line's quantity.
    ///
    /// A quantity of zero removes the line. No line is created when nothing
    /// matches. Returns whether the cart changed.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        selected_options: &SelectedOptions,
    ) -> bool {
        if quantity == 0 {
            return self.remove(product_id, selected_options);
        }

        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, selected_options))
        else {
            tracing::debug!(product_id = %product_id, "No cart line to update");
            return false;
        };

        line.quantity = quantity;
        tracing::info!(product_id = %product_id, quantity, "Updated cart quantity");
        self.commit();
        true
    }

    /// Empty the cart and delete its slot.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!(key = %self.key, error = %e, "Failed to delete saved cart");
        }

        tracing::info!("Cart cleared");
        self.notifier.notify(&CartNotice::CartCleared);
    }

    /// Write the current cart to its slot.
    ///
    /// Called at the end of every mutation; failures are logged, not returned.
    fn commit(&mut self) {
        let serialized = match serde_json::to_string(&self.lines) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &serialized) {
            tracing::error!(key = %self.key, error = %e, "Failed to save cart");
        }
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of snapshot price times quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Quantity of the matching line, or 0.
    #[must_use]
    pub fn item_count(&self, product_id: ProductId, selected_options: &SelectedOptions) -> u32 {
        self.lines
            .iter()
            .find(|line| line.matches(product_id, selected_options))
            .map_or(0, |line| line.quantity)
    }

    /// Shipping, tax, and grand total for the current cart.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.total_price())
    }

    /// Storage key this cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Give the storage back, e.g. to reopen the cart in a later session.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Load saved lines, falling back to an empty cart on any problem.
fn hydrate<S: CartStorage>(storage: &S, key: &str) -> Vec<CartLine> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read saved cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => normalize(lines),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding unreadable saved cart");
            Vec::new()
        }
    }
}

/// Restore cart invariants on data that was written by someone else: drop
/// zero-quantity lines and fold duplicate keys into the first occurrence.
fn normalize(saved: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(saved.len());
    for line in saved {
        if line.quantity == 0 {
            continue;
        }
        if let Some(existing) = lines
            .iter_mut()
            .find(|l| l.matches(line.product_id, &line.selected_options))
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            lines.push(line);
        }
    }
    lines
}
