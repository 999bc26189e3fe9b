//! HTTP Server Module
//!
//! Start/stop orchestration around `axum::serve`: request tracing, a
//! per-request timeout and graceful shutdown on OS signals or on demand.

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

// == Defaults ==
/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Wait between an OS shutdown signal and the actual shutdown.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(3);

// == Http Server ==
/// Serves a router until an OS signal arrives or [`stop`](Self::stop) is
/// called.
///
/// On Ctrl+C, SIGTERM or SIGQUIT the server waits `stop_timeout` before it
/// stops accepting connections; a programmatic stop is immediate. In-flight
/// requests are drained in both cases.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    address: String,
    timeout: Duration,
    stop_timeout: Duration,
    shutdown: CancellationToken,
}

impl HttpServer {
    // == Constructor ==
    pub fn new(router: Router) -> Self {
        Self {
            router,
            address: DEFAULT_ADDRESS.to_string(),
            timeout: DEFAULT_TIMEOUT,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    /// Sets the `host:port` address bound by [`start`](Self::start).
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the per-request timeout; slower requests get 408.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the wait applied after an OS shutdown signal.
    pub fn stop_timeout(mut self, stop_timeout: Duration) -> Self {
        self.stop_timeout = stop_timeout;
        self
    }

    /// Token that stops the server when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    // == Stop ==
    /// Requests shutdown. Safe to call more than once.
    pub fn stop(&self) {
        if !self.shutdown.is_cancelled() {
            info!("HTTP server stopping");
        }
        self.shutdown.cancel();
    }

    // == Start ==
    /// Binds the configured address and serves until shutdown.
    pub async fn start(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.address)
            .await
            .with_context(|| format!("failed to bind {}", self.address))?;
        self.run(listener).await
    }

    // == Run ==
    /// Serves on an already bound listener until shutdown.
    pub async fn run(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener
            .local_addr()
            .context("failed to read listener address")?;
        info!("HTTP server listening on http://{}", addr);

        let app = self
            .router
            .layer(TimeoutLayer::new(self.timeout))
            .layer(TraceLayer::new_for_http());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.shutdown, self.stop_timeout))
            .await
            .context("HTTP server error")?;

        info!("HTTP server shutdown complete");
        Ok(())
    }
}

/// Resolves once the server should stop.
async fn shutdown_signal(shutdown: CancellationToken, stop_timeout: Duration) {
    tokio::select! {
        _ = shutdown.cancelled() => {
            info!("Shutdown requested");
        }
        name = os_signal() => {
            info!("Received {}, shutting down in {:?}", name, stop_timeout);
            tokio::time::sleep(stop_timeout).await;
            shutdown.cancel();
        }
    }
}

/// Waits for Ctrl+C, SIGTERM or SIGQUIT and returns its name.
#[cfg(unix)]
async fn os_signal() -> &'static str {
    use tokio::signal::unix::SignalKind;

    tokio::select! {
        _ = ctrl_c() => "Ctrl+C",
        _ = unix_signal(SignalKind::terminate()) => "SIGTERM",
        _ = unix_signal(SignalKind::quit()) => "SIGQUIT",
    }
}

/// Waits for Ctrl+C and returns its name.
#[cfg(not(unix))]
async fn os_signal() -> &'static str {
    ctrl_c().await;
    "Ctrl+C"
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind) {
    match signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            error!("Failed to install signal handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
