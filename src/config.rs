//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CACHE_TTL: u64 = 60;
const DEFAULT_SWEEP_INTERVAL: u64 = 30;
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime in seconds of every cached order, counted from its last set
    pub cache_ttl: u64,
    /// Seconds between background sweeps of expired entries
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Upper bound in milliseconds on a single order store round trip
    pub store_timeout_ms: u64,
    /// Optional JSON file of orders loaded into the store at startup
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache entry lifetime in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `STORE_TIMEOUT_MS` - Store round trip timeout (default: 5000)
    /// - `SEED_PATH` - Orders to load at startup (default: unset)
    ///
    /// Zero durations are rejected and replaced by the default.
    pub fn from_env() -> Self {
        Self {
            cache_ttl: positive_var("CACHE_TTL", DEFAULT_CACHE_TTL),
            sweep_interval: positive_var("SWEEP_INTERVAL", DEFAULT_SWEEP_INTERVAL),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            store_timeout_ms: positive_var("STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS),
            seed_path: env::var("SEED_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            server_port: DEFAULT_SERVER_PORT,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            seed_path: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn positive_var(name: &str, default: u64) -> u64 {
    parse_var(name).filter(|v: &u64| *v > 0).unwrap_or(default)
}
