//! Order Cache - order service with a read-through, write-aside cache
//!
//! Serves orders over HTTP from an in-memory expiring cache backed by the
//! order store.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_cache::api::{create_router, AppState};
use order_cache::cache::{CacheStats, ExpiringStore};
use order_cache::models::Order;
use order_cache::repository::{InMemoryOrderRepository, OrderRepository};
use order_cache::Config;

/// Main entry point for the order service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the order store, seeding it if configured
/// 4. Create the expiring cache and start its sweep
/// 5. Warm the cache from the store (failure leaves it cold)
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, drain the server and join the sweep
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting order service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, sweep_interval={}s, port={}, store_timeout={}ms",
        config.cache_ttl, config.sweep_interval, config.server_port, config.store_timeout_ms
    );

    let repo = Arc::new(InMemoryOrderRepository::new());
    if let Some(path) = &config.seed_path {
        let seeded = seed_repository(&*repo, path).await?;
        info!(seeded, path = %path.display(), "Order store seeded");
    }

    let stats = Arc::new(CacheStats::new());
    let (cache, sweep) = ExpiringStore::start(
        config.cache_ttl(),
        config.sweep_interval(),
        stats.clone(),
    );
    info!("Cache initialized, expiry sweep started");

    let state = AppState::from_parts(repo, cache, stats, &config);

    // Warm before the listener binds so early reads do not miss needlessly
    match state.service.warmup_loader().run().await {
        Ok(count) => info!(count, "Cache warmed from order store"),
        Err(err) => warn!(error = %err, "Cache warmup failed, starting cold"),
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    sweep.join().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Seed file contents: a single order or an array of orders.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Many(Vec<Order>),
    One(Box<Order>),
}

/// Loads orders from `path` straight into the store.
async fn seed_repository(repo: &dyn OrderRepository, path: &Path) -> anyhow::Result<usize> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seed: SeedFile = serde_json::from_slice(&raw)
        .with_context(|| format!("seed file {} is not valid order JSON", path.display()))?;
    let orders = match seed {
        SeedFile::Many(orders) => orders,
        SeedFile::One(order) => vec![*order],
    };

    for order in &orders {
        order
            .validate()
            .with_context(|| format!("seed order {} is invalid", order.order_uid))?;
        repo.save(order)
            .await
            .with_context(|| format!("failed to seed order {}", order.order_uid))?;
    }
    Ok(orders.len())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
