use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mosaic_api::api::handlers::AppStateInner;
use mosaic_api::api::routes::create_router;
use mosaic_api::config::Config;
use mosaic_api::metrics;

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mosaic_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mosaic API v{}", env!("CARGO_PKG_VERSION"));

    metrics::registry::init_metrics();
    info!("Metrics registry initialized");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        v1_enabled = config.api.enable_v1_api,
        public_endpoint = ?config.api.public_endpoint,
        format_policy = ?config.api.format_policy,
        "Configuration loaded successfully"
    );

    let state = Arc::new(AppStateInner {
        api: config.api.clone(),
        instance_id: config.server.instance_id.clone(),
        bind_address: config.server_address(),
    });

    let app = create_router(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server")?;

    info!("Server listening on {}", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}
