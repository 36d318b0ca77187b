//! hubcache - cache maintenance host
//!
//! Opens the response and image caches the way the application does at
//! start, reports their state and keeps them swept until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubcache::cache::SystemClock;
use hubcache::{spawn_sweep_task, Config, ImageCache, ResponseCache};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open both caches (opening sweeps expired entries)
/// 4. Start periodic sweep tasks
/// 5. Wait for SIGINT/SIGTERM, then flush pending image writes
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hubcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hubcache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_dir={}, response_ttl={}s, image_ttl={}s, image_memory={} entries/{} bytes, sweep_interval={}s",
        config.cache_dir.display(),
        config.response_ttl,
        config.image_ttl,
        config.image_memory_count_limit,
        config.image_memory_byte_limit,
        config.sweep_interval
    );

    let clock = Arc::new(SystemClock);
    let responses = Arc::new(ResponseCache::<serde_json::Value>::responses(
        &config,
        clock.clone(),
    ));
    let images = Arc::new(ImageCache::images(&config, clock));

    for stats in [
        (responses.name(), responses.statistics()),
        (images.name(), images.statistics()),
    ] {
        info!(
            "Cache {}: {} entries, {} bytes on disk",
            stats.0, stats.1.entry_count, stats.1.total_size
        );
    }

    let mut sweepers = Vec::new();
    if config.sweep_interval > 0 {
        let interval = Duration::from_secs(config.sweep_interval);
        sweepers.push(spawn_sweep_task(responses.clone(), interval));
        sweepers.push(spawn_sweep_task(images.clone(), interval));
        info!("Background sweep tasks started");
    }

    shutdown_signal(sweepers).await?;

    images.flush().await;
    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweepers.
async fn shutdown_signal(sweepers: Vec<JoinHandle<()>>) -> anyhow::Result<()> {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = ctrl_c => {
                result?;
                info!("Received Ctrl+C, initiating shutdown...");
            }
            _ = terminate.recv() => {
                info!("Received SIGTERM, initiating shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await?;
        info!("Received Ctrl+C, initiating shutdown...");
    }

    for sweeper in &sweepers {
        sweeper.abort();
    }
    if !sweepers.is_empty() {
        warn!("Sweep tasks aborted");
    }
    Ok(())
}
