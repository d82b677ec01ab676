//! Application state shared by axum handlers.

use std::sync::Arc;

use mediastack_lib::MediastackClient;
use mediastack_mcp::McpServer;

/// Shared application state.
///
/// Cheaply cloneable. The REST handlers and the `/mcp` dispatcher use the
/// same upstream client and therefore the same connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    mcp: McpServer,
}

impl AppState {
    pub fn new(client: MediastackClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                mcp: McpServer::new(client),
            }),
        }
    }

    /// State configured from the environment. The API key is read per call.
    pub fn from_env() -> mediastack_lib::Result<Self> {
        Ok(Self::new(MediastackClient::from_env()?))
    }

    pub fn mcp(&self) -> &McpServer {
        &self.inner.mcp
    }

    pub fn client(&self) -> &MediastackClient {
        self.inner.mcp.client()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.client().config().base_url)
            .field("credential_configured", &self.client().has_credential())
            .finish()
    }
}
