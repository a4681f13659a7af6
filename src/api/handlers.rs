//! API Handlers
//!
//! HTTP request handlers for each order service endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{CacheStats, ExpiringStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{AcceptedResponse, HealthResponse, Order, StatsResponse};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside order service
    pub service: OrderService,
    /// Counters fed by the cache and the service
    pub stats: Arc<CacheStats>,
}

impl AppState {
    /// Creates a new AppState from a service and the stats it reports to.
    pub fn new(service: OrderService, stats: Arc<CacheStats>) -> Self {
        Self { service, stats }
    }

    /// Wires a service over `repo` and `cache`, sharing `stats`.
    ///
    /// `stats` must be the observer `cache` was built with for the entry
    /// count to be meaningful.
    pub fn from_parts(
        repo: Arc<dyn OrderRepository>,
        cache: Arc<ExpiringStore<Order>>,
        stats: Arc<CacheStats>,
        config: &Config,
    ) -> Self {
        let service = OrderService::new(repo, cache, stats.clone())
            .with_store_timeout(config.store_timeout());
        Self::new(service, stats)
    }
}

/// Handler for GET /order/:order_uid
///
/// Returns the order, from the cache when possible.
pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(order_uid): Path<String>,
) -> Result<Json<Order>> {
    let order = state.service.read(&order_uid).await?;
    Ok(Json(order))
}

/// Handler for POST /order
///
/// Accepts a raw JSON order, the same payload the order feed delivers.
pub async fn create_order_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AcceptedResponse>)> {
    let order_uid = state.service.handle_order_message(&body).await?;
    info!(order_uid = %order_uid, "order accepted");
    Ok((StatusCode::CREATED, Json(AcceptedResponse::new(order_uid))))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.stats.snapshot()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
