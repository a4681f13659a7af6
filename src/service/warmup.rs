//! Cache warmup
//!
//! One-shot bulk load of every stored order into the cache, run at startup
//! before the read path is exposed.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use super::DEFAULT_STORE_TIMEOUT;
use crate::cache::OrderCache;
use crate::error::{OrderError, Result, StoreError};
use crate::repository::OrderRepository;

/// Loads the whole order store into the cache.
pub struct WarmupLoader {
    repo: Arc<dyn OrderRepository>,
    cache: Arc<dyn OrderCache>,
    store_timeout: Duration,
}

impl WarmupLoader {
    pub fn new(repo: Arc<dyn OrderRepository>, cache: Arc<dyn OrderCache>) -> Self {
        Self {
            repo,
            cache,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the bound on the bulk fetch.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    // == Run ==
    /// Fetches every order in one call and caches each of them.
    ///
    /// Orders go through the regular cache `set`, so TTL and size signals
    /// match steady-state writes. Returns how many orders were cached; an
    /// order the cache refuses is logged and skipped.
    ///
    /// # Errors
    /// [`OrderError::Lookup`] if the bulk fetch fails or does not finish
    /// within the store timeout. Callers treat this as non-fatal: a cold
    /// cache is slower but still correct.
    pub async fn run(&self) -> Result<usize> {
        let orders = timeout(self.store_timeout, self.repo.get_all())
            .await
            .unwrap_or(Err(StoreError::Timeout))
            .map_err(|source| OrderError::Lookup {
                key: "*".to_string(),
                source,
            })?;

        let total = orders.len();
        let mut cached = 0;
        for order in orders {
            let order_uid = order.order_uid.clone();
            match self.cache.set(&order_uid, order).await {
                Ok(()) => cached += 1,
                Err(err) => warn!(order_uid = %order_uid, error = %err, "warmup skipped order"),
            }
        }

        info!(cached, total, "cache warmup complete");
        Ok(cached)
    }
}
