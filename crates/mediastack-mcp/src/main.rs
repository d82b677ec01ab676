use anyhow::Result;
use mediastack_mcp::{configure_tracing, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging MUST go to stderr to avoid stdout protocol corruption
    configure_tracing(None)?;
    serve_stdio().await
}
