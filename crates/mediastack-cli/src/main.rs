use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mediastack_lib::config::clamp_timeout;
use mediastack_lib::{ClientConfig, EnvCredential, MediastackClient};

mod commands;
mod output;

use commands::news::NewsArgs;
use commands::sources::SourcesArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "mediastack news tools from the command line")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Override the mediastack API base URL (default: MEDIASTACK_BASE_URL or the public API).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Upstream request timeout in seconds, clamped to 10-30.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

impl GlobalOptions {
    /// Client configuration: environment first, then flag overrides.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(clamp_timeout(Duration::from_secs(secs)));
        }
        config
    }

    pub fn client(&self) -> Result<MediastackClient> {
        MediastackClient::new(self.client_config(), Arc::new(EnvCredential::default()))
            .context("failed to build mediastack client")
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available tools and their input schemas. Needs no API key.
    Tools,
    /// Fetch the latest news stories (get_latest_news).
    News(NewsArgs),
    /// List news sources (get_sources).
    Sources(SourcesArgs),
    /// Run the MCP server on stdin/stdout.
    Mcp {
        /// Log filter directive for stderr logging (overrides RUST_LOG).
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tools => {
            init_tracing();
            commands::tools::run()
        }
        Command::News(args) => {
            init_tracing();
            commands::news::run(&cli.global, args).await
        }
        Command::Sources(args) => {
            init_tracing();
            commands::sources::run(&cli.global, args).await
        }
        Command::Mcp { log_level } => commands::mcp::run(&cli.global, log_level.as_deref()).await,
    }
}

/// stdout is reserved for command output; diagnostics go to stderr.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_news_args_allow_exclusions_and_negative_limit() {
        let cli = Cli::try_parse_from([
            "mediastack-cli",
            "news",
            "--keywords",
            "-ethereum",
            "--limit",
            "-5",
        ])
        .unwrap();

        match cli.command {
            Command::News(args) => {
                assert_eq!(args.keywords.as_deref(), Some("-ethereum"));
                assert_eq!(args.limit, -5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_timeout_is_clamped() {
        let cli = Cli::try_parse_from(["mediastack-cli", "--timeout-secs", "120", "tools"]).unwrap();
        assert_eq!(cli.global.client_config().timeout, Duration::from_secs(30));

        let cli = Cli::try_parse_from(["mediastack-cli", "tools", "--base-url", "http://proxy/v1"])
            .unwrap();
        assert_eq!(cli.global.client_config().base_url, "http://proxy/v1");
    }
}
