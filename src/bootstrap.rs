use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::serve_api;
use crate::cache::LiveBlockCache;
use crate::config::AppConfig;
use crate::provider::create_block_source;

/// Main entry point for the application.
///
/// Loads configuration, starts the live cache and serves the HTTP API until
/// Ctrl-C. Upstream outages never end this function; only configuration
/// and bind errors do.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    info!(
        rpc_url = %config.provider.url,
        throttle_ms = config.cache.throttle_interval.as_millis() as u64,
        reconnect_delay_ms = config.cache.reconnect_delay.as_millis() as u64,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    let source =
        create_block_source(&config.provider).context("Failed to create block source")?;

    let cache = LiveBlockCache::new(source, config.cache.clone());
    cache.start();

    serve_api(listener, cache.clone(), shutdown_signal()).await?;

    cache.stop().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
    }
}
