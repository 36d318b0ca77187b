//! Expired-Entry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Cache, Codec};

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep runs on the blocking pool since it walks the
/// cache directory.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_sweep_task<C: Codec>(cache: Arc<Cache<C>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            cache = %cache.name(),
            "Starting expiry sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let sweeping = cache.clone();
            let removed =
                match tokio::task::spawn_blocking(move || sweeping.invalidate_expired()).await {
                    Ok(removed) => removed,
                    Err(e) => {
                        warn!(cache = %cache.name(), error = %e, "expiry sweep panicked");
                        continue;
                    }
                };

            if removed > 0 {
                info!(cache = %cache.name(), "Expiry sweep: removed {} entries", removed);
            } else {
                debug!(cache = %cache.name(), "Expiry sweep: no expired entries found");
            }
        }
    })
}
