//! Order Cache - order service with a read-through, write-aside cache
//!
//! Orders are committed to a durable store and kept warm in an in-memory
//! expiring cache that serves reads.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{OrderService, WarmupLoader};
pub use tasks::{spawn_sweeper, SweepHandle};
