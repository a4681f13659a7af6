//! Cache Module
//!
//! In-memory expiring store and the cache contract the order service
//! depends on.

mod entry;
mod stats;
mod store;


use async_trait::async_trait;

use crate::error::CacheError;
use crate::models::Order;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheObserver, CacheStats, NoopObserver, StatsSnapshot};
pub use store::ExpiringStore;

// == Order Cache ==
/// Cache of orders keyed by order uid.
///
/// Implemented by [`ExpiringStore<Order>`]; test doubles implement it to
/// exercise the service without timing.
#[async_trait]
pub trait OrderCache: Send + Sync {
    /// Returns the cached order if it is present and live.
    async fn get(&self, order_uid: &str) -> Option<Order>;

    /// Inserts or replaces the cached order.
    async fn set(&self, order_uid: &str, order: Order) -> Result<(), CacheError>;
}
