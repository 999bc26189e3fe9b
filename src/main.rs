//! Toolshed demo server
//!
//! Serves a string cache with periodic whole-cache eviction over HTTP.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolshed::{api::create_router, AppState, Config, HttpServer};

/// Main entry point for the demo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache, starting periodic eviction if configured
/// 4. Create Axum router with all endpoints
/// 5. Serve until Ctrl+C/SIGTERM/SIGQUIT, then stop eviction
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolshed=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting toolshed demo server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, eviction_interval={}s, request_timeout={}s, stop_timeout={}s",
        config.server_port, config.eviction_interval, config.request_timeout, config.stop_timeout
    );

    let state = AppState::from_config(&config);
    let cache = state.cache.clone();
    info!("Cache initialized (periodic eviction: {})", cache.is_evicting());

    let result = HttpServer::new(create_router(state))
        .address(format!("0.0.0.0:{}", config.server_port))
        .timeout(Duration::from_secs(config.request_timeout))
        .stop_timeout(Duration::from_secs(config.stop_timeout))
        .start()
        .await;

    cache.stop();
    info!("Server shutdown complete");

    result
}
