//! tb-server: HTTP API server for the announcement board.
//!
//! This crate ties the tb-core types and tb-store storage into a running
//! server application. It provides:
//!
//! - Axum-based HTTP API for announcements and image assets
//! - Static serving of the asset directory under `/static`
//! - An OpenAPI document at `/api-docs/openapi.json`
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use tb_core::config::Config;

use crate::context::AppContext;

/// Start the tablon server.
///
/// Opens the record file and asset directory named by `config`, binds the
/// listener, and serves until a shutdown signal is received.
pub async fn start(config: Config) -> tb_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| tb_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext::open(config)?;
    tracing::info!(
        "Announcements at {}, images at {}",
        ctx.announcements.path().display(),
        ctx.images.dir().display()
    );

    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| tb_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
