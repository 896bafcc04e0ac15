//! VMS site server entry point.
//!
//! Prepares the data and upload directories, then starts the Axum HTTP
//! server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use vms_server::build_router;
use vms_server::config::ServerConfig;
use vms_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        data_dir = %config.data_dir.display(),
        public_dir = %config.public_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "VMS site starting"
    );

    // ServeDir answers 404 for a missing root; create it up front so the
    // first upload is served without a restart.
    let uploads_dir = config.uploads_dir();
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .with_context(|| format!("failed to create {}", uploads_dir.display()))?;

    let state = Arc::new(AppState::from_config(&config));

    // Creates the document with defaults when absent.
    let hero = state.store.load().await;
    info!(slides = hero.slides.len(), "hero config ready");

    let app = build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "VMS server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context("server error")?;

    info!("VMS server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then close open change streams so the
/// graceful shutdown can drain.
async fn shutdown_signal(state: Arc<AppState>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    state.begin_shutdown();
}
