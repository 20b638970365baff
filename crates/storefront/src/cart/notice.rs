//! User-facing confirmation signals emitted by cart mutations.
//!
//! The cart only decides *what* happened; a front end decides how to show it
//! (toast, status line, log entry).

use std::sync::{Arc, Mutex, PoisonError};

use shopflow_core::ProductId;

/// Severity a front end should render a notice with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
}

/// Something the shopper should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    /// A new line was appended holding `quantity` units.
    ItemAdded { product_name: String, quantity: u32 },
    /// An add merged into an existing line, which now holds `new_quantity`
    /// units in total.
    QuantityUpdated {
        product_name: String,
        new_quantity: u32,
    },
    /// One or more lines were removed.
    ItemRemoved { product_id: ProductId },
    /// The whole cart was emptied.
    CartCleared,
}

impl CartNotice {
    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        match self {
            Self::ItemAdded { .. } | Self::QuantityUpdated { .. } => NoticeKind::Success,
            Self::ItemRemoved { .. } | Self::CartCleared => NoticeKind::Info,
        }
    }

    /// Text shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ItemAdded { product_name, .. } => format!("{product_name} added to cart"),
            Self::QuantityUpdated { product_name, .. } => {
                format!("Updated {product_name} quantity in cart")
            }
            Self::ItemRemoved { .. } => "Item removed from cart".to_string(),
            Self::CartCleared => "Cart cleared".to_string(),
        }
    }
}

/// Receives cart notices.
pub trait CartNotifier {
    fn notify(&self, notice: &CartNotice);
}

/// Writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl CartNotifier for TracingNotifier {
    fn notify(&self, notice: &CartNotice) {
        tracing::info!(kind = ?notice.kind(), "{}", notice.message());
    }
}

/// Keeps every notice in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<CartNotice>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<CartNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return the received notices.
    pub fn take(&self) -> Vec<CartNotice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl CartNotifier for RecordingNotifier {
    fn notify(&self, notice: &CartNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
