//! Line-delimited JSON-RPC over stdin/stdout.
//!
//! stdout carries protocol messages only. Logging must go to stderr, see
//! [`configure_tracing`].

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::select;
use tokio::signal;

use crate::server::McpServer;

/// Configure tracing to write only to stderr.
///
/// `log_level` takes an `EnvFilter` directive and overrides `RUST_LOG`.
pub fn configure_tracing(log_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid log level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

/// Stdio transport using tokio async I/O.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: tokio::io::Stdout,
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(stdin()),
            writer: stdout(),
        }
    }

    /// Read the next non-blank line. Returns `Ok(None)` on EOF.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            let mut line = String::new();
            let bytes = self
                .reader
                .read_line(&mut line)
                .await
                .context("failed to read from stdin")?;
            if bytes == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    fn check_io<T>(res: std::io::Result<T>) -> Result<T> {
        match res {
            Ok(v) => Ok(v),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "client disconnected",
            )
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write one message followed by a newline and flush.
    pub async fn write_message(&mut self, msg: &Value) -> Result<()> {
        let s = serde_json::to_string(msg)?;

        Self::check_io(self.writer.write_all(s.as_bytes()).await)?;
        Self::check_io(self.writer.write_all(b"\n").await)?;
        Self::check_io(self.writer.flush().await)?;

        Ok(())
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|ioe| ioe.kind() == std::io::ErrorKind::BrokenPipe)
        .unwrap_or(false)
}

/// Run the server loop: read messages from stdin and respond on stdout.
///
/// Requests are handled in arrival order. Returns cleanly on EOF, broken
/// pipe or Ctrl-C.
pub async fn run_server_loop(mut transport: StdioTransport, server: McpServer) -> Result<()> {
    tracing::info!("MCP server initialized, waiting for requests...");

    loop {
        select! {
            _ = signal::ctrl_c() => {
                tracing::info!("received shutdown signal, exiting gracefully");
                break;
            }

            line = transport.read_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        tracing::info!("client disconnected (EOF)");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("transport error: {:#}", e);
                        return Err(e);
                    }
                };

                let Some(response) = server.handle_line(&line).await else {
                    continue;
                };

                if let Err(e) = transport.write_message(&response).await {
                    if is_broken_pipe(&e) {
                        tracing::info!("client disconnected (broken pipe)");
                        break;
                    }
                    return Err(e);
                }
            }
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}

/// Build a server from the environment and serve it on stdio.
pub async fn serve_stdio() -> Result<()> {
    let server = McpServer::from_env().context("failed to build mediastack client")?;
    run_server_loop(StdioTransport::new(), server).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_pipe_detection() {
        let err = StdioTransport::check_io::<()>(Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe",
        )))
        .unwrap_err();
        assert!(is_broken_pipe(&err));

        let err = StdioTransport::check_io::<()>(Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )))
        .unwrap_err();
        assert!(!is_broken_pipe(&err));
    }
}
