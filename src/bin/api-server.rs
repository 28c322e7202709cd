//! Tradescan API Server
//!
//! HTTP API with health check, metrics, and scan endpoints.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tradescan::config::{get_port, ScreenerConfig};
use tradescan::core::bootstrap::build_ranker;
use tradescan::core::http::{start_server, AppState};
use tradescan::logging;
use tradescan::metrics::Metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = get_port();
    let env = tradescan::config::get_environment();
    info!("Starting Tradescan API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let config = ScreenerConfig::from_env()?;
    let metrics = Arc::new(Metrics::new()?);
    let ranker = Arc::new(build_ranker(&config, Some(metrics.clone()), None)?);
    let state = AppState::new(ranker, metrics);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
