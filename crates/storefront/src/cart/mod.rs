//! Shopping cart: state manager, persistence slots, and shopper notices.
//!
//! # Data flow
//!
//! UI event → [`CartManager`] mutation → commit to [`CartStorage`] →
//! [`CartNotice`] to the front end → caller re-reads [`CartManager::lines`].

mod manager;
mod notice;
mod storage;
mod summary;

pub use manager::{CartManager, DEFAULT_CART_KEY};
pub use notice::{CartNotice, CartNotifier, NoticeKind, RecordingNotifier, TracingNotifier};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use summary::{FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, OrderSummary, TAX_RATE};
