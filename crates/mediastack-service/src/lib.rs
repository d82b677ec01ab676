//! HTTP transport for the mediastack MCP server.
//!
//! - [`AppState`]: shared upstream client and MCP dispatcher
//! - [`app`]: the axum router (`/mcp`, REST mirror, health, metrics)
//! - [`health`]: health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for REST failures
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request tracking and metrics middleware
//!
//! Handlers are thin: all tool behaviour lives in `mediastack-lib` and all
//! JSON-RPC handling in `mediastack-mcp`.

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
pub mod routes;
mod state;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{init_metrics, metrics_handler, MetricsConfig, MetricsError};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UPSTREAM_ERROR, PROBLEM_UPSTREAM_TIMEOUT,
};
pub use routes::{app, ApiResponse};
pub use state::AppState;
