use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::credential::{CredentialSource, EnvCredential};
use crate::error::{Error, Result};
use crate::metrics::record_upstream_duration;
use crate::query::{translate, Endpoint, ToolParams, UpstreamQuery};

/// Client for the mediastack REST API.
///
/// Wraps one connection-pooled [`reqwest::Client`]; cloning is cheap and
/// clones share the pool. Each call issues exactly one request and is never
/// retried.
#[derive(Debug, Clone)]
pub struct MediastackClient {
    http: Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl MediastackClient {
    /// Build a client. The credential source is not consulted here.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .default_headers(headers)
            .build()
            .map_err(|source| Error::ClientBuild { source })?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    /// Client configured from the environment, reading `MEDIASTACK_API_KEY`
    /// lazily on each call.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env(), Arc::new(EnvCredential::default()))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a credential is currently available, without exposing it.
    pub fn has_credential(&self) -> bool {
        self.credentials.access_key().is_some()
    }

    /// Translate `params` and issue the upstream request for `endpoint`.
    pub async fn call(&self, endpoint: Endpoint, params: ToolParams) -> Result<Value> {
        let query = translate(endpoint, params, self.credentials.as_ref())?;

        let start = Instant::now();
        let result = self.send(endpoint, &query).await;
        record_upstream_duration(endpoint.path(), start.elapsed());
        result
    }

    async fn send(&self, endpoint: Endpoint, query: &UpstreamQuery) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint.path());
        debug!(url = %url, query = ?query, "sending mediastack request");

        let start = Instant::now();
        let response = self
            .http
            .get(&url)
            .query(query.pairs())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        info!(
            endpoint = %endpoint,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mediastack request completed"
        );

        if status.is_success() {
            serde_json::from_str(&body).map_err(|source| Error::ResponseFormat { source })
        } else {
            let err = error_from_body(status, &body);
            warn!(endpoint = %endpoint, error = %err, "mediastack request failed");
            Err(err)
        }
    }

    /// The request URL carries `access_key`, so it is stripped from the error.
    fn transport_error(&self, source: reqwest::Error) -> Error {
        let source = source.without_url();
        if source.is_timeout() {
            Error::Timeout {
                timeout: self.config.timeout,
                source,
            }
        } else {
            Error::Connectivity { source }
        }
    }
}

fn user_agent() -> String {
    format!("mediastack-mcp/{version}", version = env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<UpstreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// Map a non-2xx response onto [`Error::Upstream`] or [`Error::Http`].
fn error_from_body(status: StatusCode, body: &str) -> Error {
    let reason = status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string();

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: Some(details),
        }) if details.code.is_some() || details.message.is_some() => Error::Upstream {
            status: status.as_u16(),
            code: field_text(details.code).unwrap_or_else(|| "unknown".to_string()),
            message: field_text(details.message).unwrap_or_else(|| reason.clone()),
        },
        _ => Error::Http {
            status: status.as_u16(),
            reason,
        },
    }
}

/// Upstream error fields may be strings, numbers or null.
fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
