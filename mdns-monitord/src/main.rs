mod cache;
mod config;
mod mdns;
mod monitor;
mod output;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cache::RecordCache;
use crate::config::Config;
use crate::monitor::Monitor;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing goes to stderr so stdout carries only the monitor output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mdns_monitord=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting mdns-monitord");

    // Optional config path as the only argument; defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::default(),
    };

    let color = config.monitor.color.enabled();

    let mut monitor = Monitor::new(std::io::stdout(), color, RecordCache::new());
    monitor.print_banner().context("Failed to write banner")?;

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    // Spawn mDNS listener task
    let (tx, rx) = mpsc::channel(256);
    let listener_cancel = cancel.clone();
    let interface = config.monitor.interface;
    let listener_handle = tokio::spawn(async move {
        if let Err(e) = mdns::listener::run_listener(interface, tx, listener_cancel).await {
            tracing::error!("mDNS listener error: {}", e);
        }
    });

    // Spawn monitor task
    let monitor_cancel = cancel.clone();
    let prune_interval = config.cache.prune_interval_secs;
    let monitor_handle = tokio::spawn(async move {
        if let Err(e) = monitor::run(monitor, rx, prune_interval, monitor_cancel).await {
            tracing::error!("Monitor error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutdown signal received");

    cancel.cancel();
    let _ = tokio::join!(listener_handle, monitor_handle);

    tracing::info!("Shutdown complete");
    Ok(())
}
