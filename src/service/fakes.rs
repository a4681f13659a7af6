//! In-process doubles for the order store and cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::OrderCache;
use crate::error::{CacheError, StoreError};
use crate::models::Order;
use crate::repository::{InMemoryOrderRepository, OrderRepository};

/// Working repository that counts every call.
#[derive(Debug, Default)]
pub struct CountingRepository {
    inner: InMemoryOrderRepository,
    saves: AtomicUsize,
    gets: AtomicUsize,
    get_alls: AtomicUsize,
}

impl CountingRepository {
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            inner: InMemoryOrderRepository::with_orders(orders),
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn get_alls(&self) -> usize {
        self.get_alls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for CountingRepository {
    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(order).await
    }

    async fn get(&self, order_uid: &str) -> Result<Order, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(order_uid).await
    }

    async fn get_all(&self) -> Result<Vec<Order>, StoreError> {
        self.get_alls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all().await
    }
}

/// Repository whose backend is always down.
#[derive(Debug, Default)]
pub struct FailingRepository;

#[async_trait]
impl OrderRepository for FailingRepository {
    async fn save(&self, _order: &Order) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get(&self, _order_uid: &str) -> Result<Order, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_all(&self) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// Repository that takes `delay` to answer every call.
#[derive(Debug)]
pub struct SlowRepository {
    inner: InMemoryOrderRepository,
    delay: Duration,
}

impl SlowRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryOrderRepository::new(),
            delay,
        }
    }

    pub async fn saved_uids(&self) -> Vec<String> {
        self.inner
            .get_all()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|order| order.order_uid)
            .collect()
    }
}

#[async_trait]
impl OrderRepository for SlowRepository {
    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(order).await
    }

    async fn get(&self, order_uid: &str) -> Result<Order, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(order_uid).await
    }

    async fn get_all(&self) -> Result<Vec<Order>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_all().await
    }
}

/// Cache that never holds anything and rejects every write.
#[derive(Debug, Default)]
pub struct FailingCache;

#[async_trait]
impl OrderCache for FailingCache {
    async fn get(&self, _order_uid: &str) -> Option<Order> {
        None
    }

    async fn set(&self, _order_uid: &str, _order: Order) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("cache offline".to_string()))
    }
}
