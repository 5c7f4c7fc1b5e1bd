//! Expired Search Sweep
//!
//! Background task that periodically drops search entries whose TTL has run
//! out. Reads already treat an expired entry as a miss; the sweep only frees
//! the memory of entries nobody asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that purges expired search entries from every
/// entity cache.
///
/// # Arguments
/// * `state` - Shared application state holding the entity caches
/// * `interval_secs` - Interval in seconds between sweeps (0 is treated as 1)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let state = AppState::from_config(&CacheConfig::default());
/// let sweep_handle = spawn_sweep_task(state.clone(), 30);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(state: AppState, interval_secs: u64) -> JoinHandle<()> {
    let interval_secs = interval_secs.max(1);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting search sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = state.purge_expired().await;

            if removed > 0 {
                info!("Search sweep: removed {} expired entries", removed);
            } else {
                debug!("Search sweep: no expired entries found");
            }
        }
    })
}
