//! MCP (Model Context Protocol) server for the mediastack news API
//!
//! Exposes `get_latest_news` and `get_sources` to AI assistants over
//! JSON-RPC 2.0.
//!
//! # Architecture
//!
//! - `protocol`: JSON-RPC envelope validation and response construction
//! - `error`: JSON-RPC error objects and codes
//! - `tools`: `tools/list` and `tools/call`, tool failures as `isError` results
//! - `server`: transport-agnostic dispatcher ([`McpServer`])
//! - `transport`: line-delimited stdio loop
//!
//! # Transport
//!
//! On stdio the server reads one JSON-RPC message per line and writes one
//! response per line. All logging is redirected to stderr to prevent stdout
//! protocol corruption. The HTTP transport lives in `mediastack-service` and
//! drives the same [`McpServer`].

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{Error, Result};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use transport::{configure_tracing, run_server_loop, serve_stdio, StdioTransport};
