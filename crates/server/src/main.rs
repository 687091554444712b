//! Genre recommendation server.
//!
//! Trains the classifier once, then serves predictions over HTTP until
//! interrupted.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genre_model::Recommender;
use server::{AppState, ServerConfig, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,genre_model=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    info!(
        "Starting genre recommendation server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Train once; every request shares this read-only model
    let start = Instant::now();
    let recommender = Arc::new(Recommender::train().context("Failed to train recommender")?);
    info!(
        "Model ready ({}) in {:.2?}",
        recommender.classifier_name(),
        start.elapsed()
    );

    let app = build_router(AppState::new(recommender));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Keep serving; the process can still be killed externally
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
