//! Response DTOs for the order API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for an accepted order (POST /order)
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedResponse {
    /// Success message
    pub message: String,
    /// The order that was stored
    pub order_uid: String,
}

impl AcceptedResponse {
    /// Creates a new AcceptedResponse
    pub fn new(order_uid: impl Into<String>) -> Self {
        let order_uid = order_uid.into();
        Self {
            message: format!("Order '{}' stored successfully", order_uid),
            order_uid,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Keys newly inserted into the cache
    pub inserts: u64,
    /// Keys removed by the sweep
    pub evictions: u64,
    /// Entries currently held by the cache
    pub total_entries: i64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            evictions: stats.evictions,
            total_entries: stats.entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
