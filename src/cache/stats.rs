//! Cache Statistics Module
//!
//! Side-channel signals emitted by the cache and the order service, and a
//! counter-backed observer that turns them into statistics.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::Serialize;

// == Cache Observer ==
/// Receiver of cache signals.
///
/// Handed to the store and the service at construction. Every method
/// defaults to a no-op so observers only implement what they track.
pub trait CacheObserver: Send + Sync {
    /// A key absent from the store was inserted.
    fn entry_inserted(&self) {}

    /// The sweep physically removed one expired key.
    fn entry_evicted(&self) {}

    /// A read was served from the cache.
    fn read_hit(&self) {}

    /// A read fell through to the order store.
    fn read_miss(&self) {}
}

/// Observer that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CacheObserver for NoopObserver {}

// == Cache Stats ==
/// Lock-free counters fed by cache signals.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    /// Live entry count maintained from insert/evict deltas
    entries: AtomicI64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.load(Ordering::Relaxed),
        }
    }

    // == Hit Rate ==
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }
}

impl CacheObserver for CacheStats {
    fn entry_inserted(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        self.entries.fetch_add(1, Ordering::Relaxed);
    }

    fn entry_evicted(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
        self.entries.fetch_sub(1, Ordering::Relaxed);
    }

    fn read_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn read_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

// == Stats Snapshot ==
/// Plain copy of the counters at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub entries: i64,
}

impl StatsSnapshot {
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
