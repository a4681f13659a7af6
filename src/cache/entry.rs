//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached value together with the instant it stops being visible.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Deadline after which the entry is logically absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after `now`.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its deadline, so the deadline
    /// instant itself already reads as absent and the live window is
    /// `[set, set + ttl)`. A strict `now > expires_at` comparison would keep
    /// the entry visible for that one extra instant. Reads and the sweep both
    /// go through this predicate.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now, Duration::from_secs(60));

        assert_eq!(entry.value, "value");
        assert_eq!(entry.expires_at, now + Duration::from_secs(60));
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now, Duration::from_secs(10));

        assert!(!entry.is_expired(now + Duration::from_millis(9_999)));
        assert!(entry.is_expired(now + Duration::from_secs(10)));
        assert!(entry.is_expired(now + Duration::from_secs(11)));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now, Duration::ZERO);
        assert!(entry.is_expired(now));
    }
}
