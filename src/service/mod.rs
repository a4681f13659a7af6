//! Order Service Module
//!
//! Coordinates the order cache and the durable order store. Reads go to the
//! cache first and fall back to the store; writes commit to the store before
//! the cache is touched, so the cache never runs ahead of durable state.

mod warmup;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::{CacheObserver, NoopObserver, OrderCache};
use crate::error::{OrderError, Result, StoreError};
use crate::models::Order;
use crate::repository::OrderRepository;

pub use warmup::WarmupLoader;

/// Default bound on a single store round trip.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

// == Order Service ==
/// Cache-aside coordinator for orders.
///
/// Cheap to clone; clones share the same cache, store and observer.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    cache: Arc<dyn OrderCache>,
    observer: Arc<dyn CacheObserver>,
    store_timeout: Duration,
}

impl OrderService {
    // == Constructor ==
    /// Creates a service over `repo` and `cache`, reporting hit/miss signals
    /// to `observer`.
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        cache: Arc<dyn OrderCache>,
        observer: Arc<dyn CacheObserver>,
    ) -> Self {
        Self {
            repo,
            cache,
            observer,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Creates a service that emits no hit/miss signals.
    pub fn unobserved(repo: Arc<dyn OrderRepository>, cache: Arc<dyn OrderCache>) -> Self {
        Self::new(repo, cache, Arc::new(NoopObserver))
    }

    /// Sets the bound on each store round trip.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Returns a warmup loader sharing this service's store, cache and
    /// store timeout.
    pub fn warmup_loader(&self) -> WarmupLoader {
        WarmupLoader::new(self.repo.clone(), self.cache.clone())
            .with_store_timeout(self.store_timeout)
    }

    // == Read ==
    /// Returns the order for `order_uid`.
    ///
    /// A cache hit returns without touching the store. On a miss the store
    /// is queried and a found order is written back to the cache; a failure
    /// to write back only costs a later miss and is not reported.
    ///
    /// # Errors
    /// - [`OrderError::NotFound`] if the store has no such order
    /// - [`OrderError::Lookup`] if the store could not be queried in time
    pub async fn read(&self, order_uid: &str) -> Result<Order> {
        if let Some(order) = self.cache.get(order_uid).await {
            self.observer.read_hit();
            debug!(order_uid, "order served from cache");
            return Ok(order);
        }
        self.observer.read_miss();

        let fetched = timeout(self.store_timeout, self.repo.get(order_uid))
            .await
            .unwrap_or(Err(StoreError::Timeout));

        let order = match fetched {
            Ok(order) => order,
            Err(StoreError::NotFound(_)) => {
                return Err(OrderError::NotFound(order_uid.to_string()));
            }
            Err(source) => {
                return Err(OrderError::Lookup {
                    key: order_uid.to_string(),
                    source,
                });
            }
        };

        if let Err(err) = self.cache.set(order_uid, order.clone()).await {
            warn!(order_uid, error = %err, "failed to repopulate cache after store read");
        }
        debug!(order_uid, "order loaded from store");
        Ok(order)
    }

    // == Write ==
    /// Validates, persists and then caches `order`.
    ///
    /// Invalid orders never reach the store or the cache. The cache is only
    /// updated once the store has committed. The commit runs on its own task:
    /// if the caller stops waiting (timeout or a dropped future) an in-flight
    /// commit still completes and is still followed by the cache update.
    ///
    /// # Errors
    /// - [`OrderError::Validation`] if the order violates a constraint
    /// - [`OrderError::Persist`] if the store failed or did not answer in time.
    ///   A [`StoreError::Timeout`] source leaves the outcome unknown: the
    ///   commit may still land and be cached after this returns.
    pub async fn write(&self, order: Order) -> Result<()> {
        order.validate()?;

        let order_uid = order.order_uid.clone();
        let service = self.clone();
        let commit = tokio::spawn(async move { service.persist_then_cache(order).await });

        match timeout(self.store_timeout, commit).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(OrderError::Persist {
                key: order_uid,
                source: StoreError::Backend(join_err.to_string()),
            }),
            Err(_) => {
                warn!(order_uid = %order_uid, "gave up waiting for order commit");
                Err(OrderError::Persist {
                    key: order_uid,
                    source: StoreError::Timeout,
                })
            }
        }
    }

    async fn persist_then_cache(&self, order: Order) -> Result<()> {
        let order_uid = order.order_uid.clone();

        self.repo
            .save(&order)
            .await
            .map_err(|source| OrderError::Persist {
                key: order_uid.clone(),
                source,
            })?;

        if let Err(err) = self.cache.set(&order_uid, order).await {
            warn!(order_uid = %order_uid, error = %err, "order committed but not cached");
        }
        info!(order_uid = %order_uid, "order stored");
        Ok(())
    }

    // == Handle Order Message ==
    /// Decodes a raw inbound message and writes the order it carries.
    ///
    /// Returns the uid of the stored order.
    pub async fn handle_order_message(&self, payload: &[u8]) -> Result<String> {
        let order: Order = serde_json::from_slice(payload)?;
        let order_uid = order.order_uid.clone();
        self.write(order).await?;
        Ok(order_uid)
    }
}
