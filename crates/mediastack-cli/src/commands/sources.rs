use anyhow::{Context, Result};
use clap::Args;
use mediastack_lib::{get_sources, SourcesParams, DEFAULT_LIMIT};

use crate::output::print_json;
use crate::GlobalOptions;

#[derive(Args, Debug, Clone)]
pub struct SourcesArgs {
    /// Free-text search over source names.
    #[arg(long)]
    pub search: Option<String>,

    /// Comma-separated sources to include or exclude.
    #[arg(long, allow_hyphen_values = true)]
    pub sources: Option<String>,

    /// Comma-separated two-letter country codes.
    #[arg(long, allow_hyphen_values = true)]
    pub countries: Option<String>,

    /// Comma-separated language codes.
    #[arg(long, allow_hyphen_values = true)]
    pub languages: Option<String>,

    /// Comma-separated categories.
    #[arg(long, allow_hyphen_values = true)]
    pub categories: Option<String>,

    /// Maximum number of results, clamped to 1-100.
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Pagination offset.
    #[arg(long)]
    pub offset: Option<i64>,
}

impl From<SourcesArgs> for SourcesParams {
    fn from(args: SourcesArgs) -> Self {
        Self {
            search: args.search,
            sources: args.sources,
            countries: args.countries,
            languages: args.languages,
            categories: args.categories,
            limit: Some(args.limit),
            offset: args.offset,
        }
    }
}

pub async fn run(global: &GlobalOptions, args: SourcesArgs) -> Result<()> {
    let client = global.client()?;
    let sources = get_sources(&client, args.into())
        .await
        .context("get_sources failed")?;
    print_json(&sources)
}
