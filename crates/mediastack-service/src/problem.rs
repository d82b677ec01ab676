//! RFC 9457 Problem Details for HTTP APIs.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use mediastack_lib::{Error as LibError, ErrorKind};

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for a service that cannot serve calls (missing API key).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// Problem type URI for failures reported by or while reaching the upstream API.
pub const PROBLEM_UPSTREAM_ERROR: &str = "/problems/upstream-error";

/// Problem type URI for upstream calls that exceeded the timeout.
pub const PROBLEM_UPSTREAM_TIMEOUT: &str = "/problems/upstream-timeout";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use mediastack_service::{ProblemDetails, PROBLEM_INVALID_REQUEST};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INVALID_REQUEST,
///     "Invalid Request",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("invalid sort option 'newest'")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Error kind tag (e.g. `timeout_error`), shared with MCP tool failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Error code from the upstream error body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_code: Option<String>,

    /// HTTP status the upstream API answered with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            kind: None,
            upstream_code: None,
            upstream_status: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind.as_str().to_string());
        self
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 502 Bad Gateway for upstream failures.
    pub fn upstream_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_UPSTREAM_ERROR, "Upstream Error", StatusCode::BAD_GATEWAY)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 504 Gateway Timeout.
    pub fn upstream_timeout(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UPSTREAM_TIMEOUT,
            "Upstream Timeout",
            StatusCode::GATEWAY_TIMEOUT,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert a tool failure to ProblemDetails.
///
/// Missing credential is 503, invalid arguments 400, timeouts 504, every
/// other upstream failure 502.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    let detail = error.to_string();
    let kind = error.kind();

    let mut problem = match kind {
        ErrorKind::Configuration => ProblemDetails::service_unavailable(detail, request_id),
        ErrorKind::InvalidArgument => ProblemDetails::bad_request(detail, request_id),
        ErrorKind::Timeout => ProblemDetails::upstream_timeout(detail, request_id),
        ErrorKind::Connectivity
        | ErrorKind::Upstream
        | ErrorKind::Http
        | ErrorKind::ResponseFormat => ProblemDetails::upstream_error(detail, request_id),
        ErrorKind::Internal => ProblemDetails::internal_error(detail, request_id),
    }
    .with_kind(kind);

    problem.upstream_code = error.upstream_code().map(str::to_string);
    problem.upstream_status = error.upstream_status();
    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediastack_lib::SortOrder;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_UPSTREAM_ERROR,
            "Upstream Error",
            StatusCode::BAD_GATEWAY,
        );
        assert_eq!(problem.type_uri, PROBLEM_UPSTREAM_ERROR);
        assert_eq!(problem.status, 502);
        assert!(problem.kind.is_none());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"instance\":\"req-test\""));
        assert!(!json.contains("upstream_code"));
    }

    #[test]
    fn test_from_lib_error_invalid_sort() {
        let error = "newest".parse::<SortOrder>().unwrap_err();
        let problem = from_lib_error(&error, "req-sort");

        assert_eq!(problem.status, 400);
        assert_eq!(problem.kind.as_deref(), Some("invalid_argument"));
        assert!(problem.detail.as_deref().unwrap().contains("popularity"));
    }

    #[test]
    fn test_from_lib_error_upstream() {
        let error = LibError::Upstream {
            status: 401,
            code: "invalid_access_key".to_string(),
            message: "You have not supplied a valid API Access Key.".to_string(),
        };
        let problem = from_lib_error(&error, "req-up");

        assert_eq!(problem.status, 502);
        assert_eq!(problem.type_uri, PROBLEM_UPSTREAM_ERROR);
        assert_eq!(problem.upstream_code.as_deref(), Some("invalid_access_key"));
        assert_eq!(problem.upstream_status, Some(401));
    }

    #[test]
    fn test_from_lib_error_http_and_configuration() {
        let error = LibError::Http {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        let problem = from_lib_error(&error, "req-http");
        assert_eq!(problem.status, 502);
        assert_eq!(problem.upstream_status, Some(500));
        assert!(problem.upstream_code.is_none());

        let error = LibError::Configuration {
            message: "MEDIASTACK_API_KEY environment variable is required".to_string(),
        };
        let problem = from_lib_error(&error, "req-cfg");
        assert_eq!(problem.status, 503);
        assert_eq!(problem.kind.as_deref(), Some("configuration_error"));
    }
}
