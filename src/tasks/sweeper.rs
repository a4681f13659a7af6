//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries so keys
//! that are never read again do not pin memory.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ExpiringStore;

// == Sweep Handle ==
/// Lifecycle handle of a running sweep.
///
/// Stopping is idempotent. Dropping the handle stops the sweep as well.
#[derive(Debug)]
pub struct SweepHandle {
    /// Sender to signal shutdown
    shutdown_tx: watch::Sender<bool>,
    /// The sweep task, taken by `join`
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    // == Stop ==
    /// Asks the sweep to exit. Safe to call any number of times.
    pub fn stop(&self) {
        let already_stopped = self.shutdown_tx.send_replace(true);
        if !already_stopped {
            debug!("Expiry sweep stop requested");
        }
    }

    /// Returns true once the sweep task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    // == Join ==
    /// Stops the sweep and waits for the task to exit.
    pub async fn join(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "Expiry sweep task ended abnormally");
            }
        }
        info!("Expiry sweep stopped");
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the periodic sweep for `store`.
///
/// The task sleeps for the store's sweep interval, then takes the write lock
/// and drops every expired entry, until the returned handle is stopped.
///
/// # Example
/// ```ignore
/// let store = Arc::new(ExpiringStore::<Order>::unobserved(ttl, interval));
/// let sweep = spawn_sweeper(store.clone());
/// // Later, during shutdown:
/// sweep.join().await;
/// ```
pub fn spawn_sweeper<V>(store: Arc<ExpiringStore<V>>) -> SweepHandle
where
    V: Clone + Send + Sync + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let interval = store.sweep_interval();

    let task = tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting expiry sweep"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let removed = store.sweep_expired().await;

            if removed > 0 {
                info!(removed, "Expiry sweep removed expired entries");
            } else {
                debug!("Expiry sweep found no expired entries");
            }
        }
    });

    SweepHandle {
        shutdown_tx,
        task: Some(task),
    }
}
