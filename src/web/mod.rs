//! Exposition server.
//!
//! Serves the current metric batch in the Prometheus text format. Every
//! request to the metrics path triggers one scrape; there is no background
//! polling.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::{WebConfig, HEALTH_PATH};
pub use router::create_app;

use crate::client::SonarApi;
use crate::error::{ExporterError, Result};
use crate::metrics::Collector;
use std::net::SocketAddr;
use tracing::info;

/// Start the exposition server and run until interrupted.
pub async fn start_web_server<A>(config: WebConfig, collector: Collector<A>) -> Result<()>
where
    A: SonarApi + Send + Sync + 'static,
{
    config.validate()?;
    let app = create_app(&config, collector);

    // Parse the bind address
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("Invalid bind address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    info!("Starting SonarQube exporter on http://{}", addr);
    info!("Metrics endpoint: http://{}{}", addr, config.metrics_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {}", e)))?;

    info!("Exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
