//! Order Repository Module
//!
//! Contract of the durable, authoritative order store.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::Order;

pub use memory::InMemoryOrderRepository;

// == Order Repository ==
/// Durable storage of orders.
///
/// Implementations must be safe to call from many tasks at once. Callers may
/// drop an in-flight future to abandon the round trip.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Commits the order durably.
    async fn save(&self, order: &Order) -> Result<(), StoreError>;

    /// Loads one order. Absence is reported as [`StoreError::NotFound`].
    async fn get(&self, order_uid: &str) -> Result<Order, StoreError>;

    /// Loads every stored order.
    async fn get_all(&self) -> Result<Vec<Order>, StoreError>;
}
