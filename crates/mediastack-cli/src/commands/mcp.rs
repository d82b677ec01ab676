use anyhow::{Context, Result};
use mediastack_mcp::{configure_tracing, run_server_loop, McpServer, StdioTransport};

use crate::GlobalOptions;

/// Run the stdio MCP server with the CLI's client overrides applied.
pub async fn run(global: &GlobalOptions, log_level: Option<&str>) -> Result<()> {
    configure_tracing(log_level)?;

    let client = global.client().context("failed to initialize MCP server")?;
    tracing::info!(upstream = %client.config().base_url, "starting MCP server on stdio");

    run_server_loop(StdioTransport::new(), McpServer::new(client)).await
}
