//! Router and request handlers.
//!
//! # Endpoints
//!
//! - `POST /mcp` - JSON-RPC 2.0 MCP endpoint, one message per request body
//! - `GET /api/v1/news` - `get_latest_news` with query-string parameters
//! - `GET /api/v1/sources` - `get_sources` with query-string parameters
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use mediastack_lib::{get_latest_news, get_sources, LatestNewsParams, SourcesParams};

use crate::health::{health_live, health_ready};
use crate::metrics::metrics_handler;
use crate::middleware::{MetricsLayer, RequestId};
use crate::problem::{from_lib_error, ProblemDetails};
use crate::state::AppState;

/// REST response: upstream JSON verbatim, or RFC 9457 error.
#[derive(Debug)]
pub enum ApiResponse {
    Success(Value),
    Error(ProblemDetails),
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(mcp_handler))
        .route("/api/v1/news", get(news_handler))
        .route("/api/v1/sources", get(sources_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle POST /mcp. Notifications are acknowledged with 202 and no body.
async fn mcp_handler(State(state): State<AppState>, body: String) -> axum::response::Response {
    match state.mcp().handle_line(&body).await {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Handle GET /api/v1/news.
async fn news_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<LatestNewsParams>, QueryRejection>,
) -> ApiResponse {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_query(rejection, &request_id),
    };

    info!(request_id = %request_id, keywords = ?params.keywords, "handling news request");
    into_api_response(get_latest_news(state.client(), params).await, &request_id)
}

/// Handle GET /api/v1/sources.
async fn sources_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<SourcesParams>, QueryRejection>,
) -> ApiResponse {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_query(rejection, &request_id),
    };

    info!(request_id = %request_id, search = ?params.search, "handling sources request");
    into_api_response(get_sources(state.client(), params).await, &request_id)
}

fn bad_query(rejection: QueryRejection, request_id: &RequestId) -> ApiResponse {
    ApiResponse::Error(ProblemDetails::bad_request(
        rejection.body_text(),
        request_id.as_str(),
    ))
}

fn into_api_response(result: mediastack_lib::Result<Value>, request_id: &RequestId) -> ApiResponse {
    match result {
        Ok(value) => ApiResponse::Success(value),
        Err(e) => {
            warn!(request_id = %request_id, kind = %e.kind(), error = %e, "tool call failed");
            ApiResponse::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}
