//! JSON-RPC 2.0 error objects returned by the dispatcher.
//!
//! Tool failures are not JSON-RPC errors; they travel inside a successful
//! result flagged with `isError` (see [`crate::tools`]). The errors here cover
//! protocol problems only: unparsable input, malformed requests, unknown
//! methods or tools and arguments of the wrong shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for dispatcher operations.
pub type Result<T> = std::result::Result<T, Error>;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// A JSON-RPC error object.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[error("{message}")]
pub struct Error {
    /// JSON-RPC error code (e.g. -32601)
    pub code: i64,

    /// Human-readable error message
    pub message: String,

    /// Additional context (e.g. the offending method name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Error {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Input line was not valid JSON.
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, "Parse error").with_data(json!({ "detail": detail.into() }))
    }

    /// Valid JSON that is not a JSON-RPC 2.0 request.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, format!("Invalid Request: {}", reason.into()))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Unknown method: {}", method))
            .with_data(json!({ "method": method }))
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Unknown tool: {}", name))
            .with_data(json!({ "tool": name }))
    }

    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {}", reason.into()))
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, format!("Internal error: {}", reason.into()))
    }

    /// Wire form of this error.
    pub fn to_value(&self) -> Value {
        let mut value = json!({ "code": self.code, "message": self.message });
        if let Some(data) = &self.data {
            value["data"] = data.clone();
        }
        value
    }
}
