//! `tools/list` and `tools/call` handling.
//!
//! Argument decoding failures are protocol errors (`-32602`). Anything the
//! library reports once the arguments decoded is a tool failure and comes
//! back as a normal result with `isError: true`.

use mediastack_lib::{
    find_tool, get_latest_news, get_sources, Endpoint, Error as LibError, LatestNewsParams,
    MediastackClient, SourcesParams, ToolDefinition, TOOLS,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{Error, Result};
use crate::protocol::params_object;

/// Result body for `tools/list`.
pub fn list_tools() -> Value {
    let tools: Vec<Value> = TOOLS.iter().map(describe_tool).collect();
    json!({ "tools": tools })
}

fn describe_tool(tool: &ToolDefinition) -> Value {
    json!({
        "name": tool.name,
        "description": tool.description,
        "inputSchema": tool.input_schema(),
    })
}

/// Dispatch a `tools/call` request.
pub async fn call_tool(client: &MediastackClient, params: Option<Value>) -> Result<Value> {
    let mut params = params_object(params)?;

    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err(Error::invalid_params("missing tool name")),
    };
    let tool = find_tool(&name).ok_or_else(|| Error::unknown_tool(&name))?;

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => json!({}),
        Some(arguments) => arguments,
    };

    let outcome = match tool.endpoint {
        Endpoint::News => get_latest_news(client, decode_arguments::<LatestNewsParams>(arguments)?).await,
        Endpoint::Sources => get_sources(client, decode_arguments::<SourcesParams>(arguments)?).await,
    };

    Ok(match outcome {
        Ok(value) => tool_success(value),
        Err(err) => {
            warn!(tool = tool.name, kind = %err.kind(), error = %err, "tool call failed");
            tool_failure(&err)
        }
    })
}

fn decode_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::invalid_params(e.to_string()))
}

/// Result body carrying the upstream JSON. `structuredContent` must be a
/// JSON object, so other values are returned as text only.
pub fn tool_success(value: Value) -> Value {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    let mut result = json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false,
    });
    if value.is_object() {
        result["structuredContent"] = value;
    }
    result
}

/// Result body for a failed tool call.
pub fn tool_failure(err: &LibError) -> Value {
    let payload = failure_payload(err);
    json!({
        "content": [{ "type": "text", "text": payload.to_string() }],
        "isError": true,
    })
}

/// Structured failure: `{"error": {"kind", "message", "code"?, "status"?}}`.
pub fn failure_payload(err: &LibError) -> Value {
    let mut error = json!({
        "kind": err.kind().as_str(),
        "message": err.to_string(),
    });
    if let Some(code) = err.upstream_code() {
        error["code"] = json!(code);
    }
    if let Some(status) = err.upstream_status() {
        error["status"] = json!(status);
    }
    json!({ "error": error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mediastack_lib::{ClientConfig, StaticCredential};

    use crate::error::{INVALID_PARAMS, METHOD_NOT_FOUND};

    fn offline_client() -> MediastackClient {
        MediastackClient::new(ClientConfig::default(), Arc::new(StaticCredential::missing()))
            .unwrap()
    }

    #[test]
    fn test_list_tools_has_schemas() {
        let listed = list_tools();
        let tools = listed["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "get_latest_news");
        assert_eq!(tools[1]["name"], "get_sources");
        for tool in tools {
            assert_eq!(tool["inputSchema"]["type"], "object");
            assert!(tool["description"].as_str().unwrap().contains("mediastack"));
        }
    }

    #[test]
    fn test_failure_payload_upstream_fields() {
        let err = LibError::Upstream {
            status: 401,
            code: "invalid_access_key".to_string(),
            message: "You have not supplied a valid API Access Key.".to_string(),
        };
        let payload = failure_payload(&err);
        assert_eq!(payload["error"]["kind"], "upstream_error");
        assert_eq!(payload["error"]["code"], "invalid_access_key");
        assert_eq!(payload["error"]["status"], 401);

        let result = tool_failure(&err);
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        let decoded: Value = serde_json::from_str(text).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_tool_success_structured_content() {
        let body = json!({"data": [{"title": "t"}]});
        let result = tool_success(body.clone());
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"], body);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), body);
    }

    #[test]
    fn test_tool_success_non_object_is_text_only() {
        let body = json!([{"name": "BBC News"}]);
        let result = tool_success(body.clone());
        assert_eq!(result["isError"], false);
        assert!(result.get("structuredContent").is_none());
        let text = result["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), body);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = call_tool(&offline_client(), Some(json!({"name": "get_weather"})))
            .await
            .unwrap_err();
        assert_eq!(err.code, METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: get_weather");
    }

    #[tokio::test]
    async fn test_wrong_argument_type_is_invalid_params() {
        let err = call_tool(
            &offline_client(),
            Some(json!({"name": "get_sources", "arguments": {"limit": "ten"}})),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_missing_name_is_invalid_params() {
        let err = call_tool(&offline_client(), Some(json!({"arguments": {}})))
            .await
            .unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_missing_credential_is_tool_failure() {
        let result = call_tool(&offline_client(), Some(json!({"name": "get_latest_news"})))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("configuration_error"));
        assert!(text.contains("MEDIASTACK_API_KEY"));
    }

    #[tokio::test]
    async fn test_invalid_sort_is_tool_failure() {
        let result = call_tool(
            &offline_client(),
            Some(json!({"name": "get_latest_news", "arguments": {"sort": "newest"}})),
        )
        .await
        .unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("invalid_argument"));
    }
}
