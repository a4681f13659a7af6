//! In-memory order repository
//!
//! Process-local stand-in for a database. Used by the binary when no external
//! store is wired in, and as the default fake in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::OrderRepository;
use crate::error::StoreError;
use crate::models::Order;

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository already holding `orders`.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let orders = orders
            .into_iter()
            .map(|order| (order.order_uid.clone(), order))
            .collect();
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Removes an order, returning it if it was stored.
    pub async fn remove(&self, order_uid: &str) -> Option<Order> {
        self.orders.write().await.remove(order_uid)
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        let replaced = self
            .orders
            .write()
            .await
            .insert(order.order_uid.clone(), order.clone())
            .is_some();
        debug!(order_uid = %order.order_uid, replaced, "order saved");
        Ok(())
    }

    async fn get(&self, order_uid: &str) -> Result<Order, StoreError> {
        self.orders
            .read()
            .await
            .get(order_uid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(order_uid.to_string()))
    }

    async fn get_all(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| a.order_uid.cmp(&b.order_uid));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::fixtures::order;

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryOrderRepository::new();
        repo.save(&order("A1")).await.unwrap();

        assert_eq!(repo.get("A1").await.unwrap(), order("A1"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        assert_eq!(
            repo.get("missing").await,
            Err(StoreError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = InMemoryOrderRepository::new();
        let mut updated = order("A1");
        updated.locale = "ru".to_string();

        repo.save(&order("A1")).await.unwrap();
        repo.save(&updated).await.unwrap();

        assert_eq!(repo.get("A1").await.unwrap().locale, "ru");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_all_sorted() {
        let repo = InMemoryOrderRepository::with_orders([order("A3"), order("A1"), order("A2")]);

        let uids: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_uid)
            .collect();
        assert_eq!(uids, vec!["A1", "A2", "A3"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryOrderRepository::with_orders([order("A1")]);
        assert!(repo.remove("A1").await.is_some());
        assert!(repo.is_empty().await);
        assert!(repo.remove("A1").await.is_none());
    }
}
