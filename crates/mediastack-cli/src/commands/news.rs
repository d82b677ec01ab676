use anyhow::{Context, Result};
use clap::Args;
use mediastack_lib::{get_latest_news, LatestNewsParams, DEFAULT_LIMIT};

use crate::output::print_json;
use crate::GlobalOptions;

#[derive(Args, Debug, Clone)]
pub struct NewsArgs {
    /// Search terms; prefix a term with - to exclude it (e.g. "bitcoin -ethereum").
    #[arg(long, allow_hyphen_values = true)]
    pub keywords: Option<String>,

    /// Comma-separated sources to include or exclude (e.g. "cnn,-fox").
    #[arg(long, allow_hyphen_values = true)]
    pub sources: Option<String>,

    /// Comma-separated two-letter country codes (e.g. "us,gb").
    #[arg(long, allow_hyphen_values = true)]
    pub countries: Option<String>,

    /// Comma-separated language codes (e.g. "en,-de").
    #[arg(long, allow_hyphen_values = true)]
    pub languages: Option<String>,

    /// Comma-separated categories: business, entertainment, general, health, science, sports, technology.
    #[arg(long, allow_hyphen_values = true)]
    pub categories: Option<String>,

    /// Date or range: YYYY-MM-DD or YYYY-MM-DD,YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,

    /// published_desc, published_asc or popularity.
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of results, clamped to 1-100.
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Pagination offset.
    #[arg(long)]
    pub offset: Option<i64>,
}

impl From<NewsArgs> for LatestNewsParams {
    fn from(args: NewsArgs) -> Self {
        Self {
            keywords: args.keywords,
            sources: args.sources,
            countries: args.countries,
            languages: args.languages,
            categories: args.categories,
            date: args.date,
            sort: args.sort,
            limit: Some(args.limit),
            offset: args.offset,
        }
    }
}

pub async fn run(global: &GlobalOptions, args: NewsArgs) -> Result<()> {
    let client = global.client()?;
    let news = get_latest_news(&client, args.into())
        .await
        .context("get_latest_news failed")?;
    print_json(&news)
}
