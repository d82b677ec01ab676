//! JSON-RPC 2.0 envelope handling.

use serde_json::{json, Map, Value};

use crate::error::Error;

pub const JSONRPC_VERSION: &str = "2.0";

/// A request or notification that passed envelope validation.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// `None` when the message carried no `id` member, which makes it a
    /// notification. An explicit `"id": null` is kept as `Some(Null)`.
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validate the envelope of an already-parsed message.
    ///
    /// On failure the returned id is the request's id when one could be
    /// read, otherwise `null`.
    pub fn from_value(message: Value) -> std::result::Result<Self, (Value, Error)> {
        let mut object = match message {
            Value::Object(object) => object,
            Value::Array(_) => {
                return Err((Value::Null, Error::invalid_request("batch requests are not supported")))
            }
            _ => return Err((Value::Null, Error::invalid_request("expected a JSON object"))),
        };

        let id = object.remove("id");
        let reply_id = id.clone().unwrap_or(Value::Null);

        match object.get("jsonrpc").and_then(Value::as_str) {
            Some(JSONRPC_VERSION) => {}
            _ => return Err((reply_id, Error::invalid_request("jsonrpc must be \"2.0\""))),
        }

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err((reply_id, Error::invalid_request("missing method"))),
        };

        Ok(Self {
            id,
            method,
            params: object.remove("params"),
        })
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Successful response envelope.
pub fn success(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "result": result })
}

/// Error response envelope.
pub fn failure(id: Value, error: &Error) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "error": error.to_value() })
}

/// Params as an object; absent or `null` params become an empty object.
pub fn params_object(params: Option<Value>) -> std::result::Result<Map<String, Value>, Error> {
    match params {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(Error::invalid_params("params must be an object")),
    }
}
