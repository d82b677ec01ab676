//! mediastack MCP HTTP service.
//!
//! # Configuration
//!
//! - `MEDIASTACK_API_KEY` - mediastack access key, read on every tool call
//! - `MEDIASTACK_BASE_URL` - upstream base URL (default: https://api.mediastack.com/v1)
//! - `MEDIASTACK_TIMEOUT_SECS` - upstream timeout, clamped to 10-30 (default: 10)
//! - `SERVICE_HOST` / `SERVICE_PORT` - listen address (default: 0.0.0.0:8080)
//! - `RUST_LOG` - log level (default: info)
//! - `LOG_FORMAT` - log format: json (default) or text
//! - `METRICS_ENABLED` - set to "false" to disable Prometheus metrics

use std::net::SocketAddr;

use tracing::{info, warn};

use mediastack_service::{
    app, init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env())?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    let state = AppState::from_env()?;

    info!(
        addr = %config.bind_address(),
        upstream = %state.client().config().base_url,
        credential_configured = state.client().has_credential(),
        "starting mediastack service"
    );
    if !state.client().has_credential() {
        warn!("MEDIASTACK_API_KEY is not set; tool calls will fail until it is");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal, draining connections");
}
