//! Health check handlers for Kubernetes probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok", or "degraded" when tool calls would fail.
    pub status: String,

    pub service: String,

    pub version: String,

    /// Whether `MEDIASTACK_API_KEY` is currently set (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_configured: Option<bool>,

    /// Upstream base URL (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            credential_configured: None,
            upstream: None,
        }
    }

    /// Readiness report. A missing credential degrades the status but the
    /// service still serves discovery and health.
    pub fn ready(service: &str, version: &str, credential_configured: bool, upstream: &str) -> Self {
        Self {
            status: if credential_configured { "ok" } else { "degraded" }.to_string(),
            service: service.to_string(),
            version: version.to_string(),
            credential_configured: Some(credential_configured),
            upstream: Some(upstream.to_string()),
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"mediastack-service","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler. Always 200.
///
/// ```text
/// GET /health/ready
/// {"status":"degraded","service":"mediastack-service","version":"0.1.0","credential_configured":false,"upstream":"https://api.mediastack.com/v1"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let client = state.client();
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        client.has_credential(),
        &client.config().base_url,
    );
    (StatusCode::OK, Json(status))
}
