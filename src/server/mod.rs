//! Inspection server: route resolution and session storage over HTTP

mod routes;

pub use routes::{create_router, AppState, SharedBackend};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Bind `0.0.0.0:<port>` and serve until SIGINT/SIGTERM.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("{} listening on http://{}", state.app_name, addr);
    info!("  GET    /resolve?path=/     - Resolve a path to a view");
    info!("  GET    /storage            - Session snapshot");
    debug!("  GET    /routes             - Route table");
    debug!("  PUT    /storage/<key>      - Write session, accounts or isConnected");
    debug!("  DELETE /storage[?all=true] - Clear owned keys (or everything)");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
            }
            _ => {
                tracing::warn!("signal handlers unavailable; falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C");
    }
}
