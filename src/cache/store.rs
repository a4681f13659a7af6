//! Expiring Store Module
//!
//! Concurrent key/value map where every entry lives for a fixed TTL from its
//! last set. Expiry is enforced lazily on read and reclaimed by a periodic
//! sweep (see [`crate::tasks::spawn_sweeper`]).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheObserver, NoopObserver, OrderCache};
use crate::error::CacheError;
use crate::models::Order;
use crate::tasks::{spawn_sweeper, SweepHandle};

// == Expiring Store ==
/// In-memory map with a uniform TTL and interval-based reclamation.
///
/// Readers share the lock; `set` and the sweep take it exclusively.
pub struct ExpiringStore<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Lifetime applied on every set
    default_ttl: Duration,
    /// Period of the background sweep
    sweep_interval: Duration,
    /// Receiver of size signals
    observer: Arc<dyn CacheObserver>,
}

impl<V> ExpiringStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty store. No sweep runs until one is spawned.
    ///
    /// # Arguments
    /// * `default_ttl` - Lifetime of every entry, counted from its last set
    /// * `sweep_interval` - Period used by the sweep task
    /// * `observer` - Receives one signal per inserted and per swept key
    pub fn new(
        default_ttl: Duration,
        sweep_interval: Duration,
        observer: Arc<dyn CacheObserver>,
    ) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            sweep_interval,
            observer,
        }
    }

    /// Creates a store that emits no signals.
    pub fn unobserved(default_ttl: Duration, sweep_interval: Duration) -> Self {
        Self::new(default_ttl, sweep_interval, Arc::new(NoopObserver))
    }

    // == Start ==
    /// Creates a shared store and starts its sweep.
    ///
    /// Must be called from within a Tokio runtime. The returned handle stops
    /// the sweep explicitly or when dropped.
    pub fn start(
        default_ttl: Duration,
        sweep_interval: Duration,
        observer: Arc<dyn CacheObserver>,
    ) -> (Arc<Self>, SweepHandle) {
        let store = Arc::new(Self::new(default_ttl, sweep_interval, observer));
        let handle = spawn_sweeper(store.clone());
        (store, handle)
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`.
    ///
    /// The deadline is recomputed on every call, so re-setting a key restarts
    /// its clock. The insert signal fires only when the key was not present.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry::new(value, Instant::now(), self.default_ttl);

        let inserted = {
            let mut entries = self.entries.write().await;
            entries.insert(key.clone(), entry).is_none()
        };

        if inserted {
            self.observer.entry_inserted();
        }
        debug!(key = %key, inserted, "cache entry set");
    }

    // == Get ==
    /// Returns the value for `key` if present and not yet expired.
    ///
    /// Expired entries are reported absent but left in place for the sweep.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    // == Sweep Expired ==
    /// Physically removes every expired entry.
    ///
    /// Returns the number of entries removed; one eviction signal fires per key.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let removed = {
            let mut entries = self.entries.write().await;
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            before - entries.len()
        };

        for _ in 0..removed {
            self.observer.entry_evicted();
        }
        removed
    }

    // == Length ==
    /// Returns the number of entries physically held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

#[async_trait]
impl OrderCache for ExpiringStore<Order> {
    async fn get(&self, order_uid: &str) -> Option<Order> {
        ExpiringStore::get(self, order_uid).await
    }

    async fn set(&self, order_uid: &str, order: Order) -> Result<(), CacheError> {
        ExpiringStore::set(self, order_uid, order).await;
        Ok(())
    }
}
