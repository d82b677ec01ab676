//! MCP request dispatcher.
//!
//! [`McpServer`] is transport-agnostic: the stdio loop and the HTTP `/mcp`
//! route both hand it one message at a time and write back whatever it
//! returns. `None` means the message was a notification and nothing is sent.

use std::sync::Arc;

use mediastack_lib::MediastackClient;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::protocol::{failure, success, JsonRpcRequest};
use crate::tools;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "mediastack";

const INSTRUCTIONS: &str = "Search and filter news articles and list news sources from the \
mediastack API. Use get_latest_news for articles and get_sources for publishers. \
Calls need MEDIASTACK_API_KEY to be set for the server process.";

/// Shared dispatcher state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct McpServer {
    client: Arc<MediastackClient>,
}

impl McpServer {
    pub fn new(client: MediastackClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Server backed by a client configured from the environment.
    ///
    /// The API key is not read here; a missing key surfaces on the first
    /// tool call.
    pub fn from_env() -> mediastack_lib::Result<Self> {
        Ok(Self::new(MediastackClient::from_env()?))
    }

    pub fn client(&self) -> &MediastackClient {
        &self.client
    }

    /// Handle one raw line or body. Unparsable JSON yields a `-32700` reply.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                debug!(error = %e, "failed to parse JSON-RPC message");
                Some(failure(Value::Null, &Error::parse_error(e.to_string())))
            }
        }
    }

    /// Handle one parsed message.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let request = match JsonRpcRequest::from_value(message) {
            Ok(request) => request,
            Err((id, err)) => return Some(failure(id, &err)),
        };

        debug!(method = %request.method, notification = request.is_notification(), "dispatching");
        let outcome = self.dispatch(&request.method, request.params).await;

        match request.id {
            None => {
                if let Err(err) = outcome {
                    debug!(error = %err, "notification failed; no response sent");
                }
                None
            }
            Some(id) => Some(match outcome {
                Ok(result) => success(id, result),
                Err(err) => failure(id, &err),
            }),
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value> {
        match method {
            "initialize" => {
                info!("client initialized session");
                Ok(initialize_result())
            }
            "notifications/initialized" | "notifications/cancelled" => Ok(Value::Null),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools::list_tools()),
            "tools/call" => tools::call_tool(&self.client, params).await,
            other => Err(Error::method_not_found(other)),
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        "capabilities": { "tools": { "listChanged": false } },
        "instructions": INSTRUCTIONS,
    })
}
