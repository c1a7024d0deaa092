//! lt-server: HTTP API for browsing and streaming a local course library.
//!
//! This crate turns the decisions made in `lt-core` into HTTP responses:
//!
//! - Axum router with catalog, video and subtitle endpoints
//! - Chunked file streaming with single-range support
//! - Request IDs, permissive CORS, request tracing
//! - Optional static frontend with SPA fallback
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use lt_core::config::Config;
use tokio::net::TcpListener;

use crate::context::AppContext;

/// Start the lectern server.
///
/// Binds the configured address, serves until a shutdown signal arrives,
/// then lets in-flight responses finish.
pub async fn start(config: Config) -> lt_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let static_dir = config.server.static_dir.clone();

    tracing::info!(
        courses_path = %config.library.courses_path.display(),
        sort_order = ?config.library.sort_order,
        range_parsing = ?config.library.range_parsing,
        "Serving course library"
    );

    let ctx = AppContext::new(config);
    let app = router::build_router(ctx, static_dir);

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| lt_core::Error::Internal(format!("Failed to bind to {host}:{port}: {e}")))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
