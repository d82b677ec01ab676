//! The two tool operations and the static tool table.
//!
//! Each operation validates its parameters, translates them into an upstream
//! query and performs one request, returning the upstream JSON verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::client::MediastackClient;
use crate::error::Result;
use crate::metrics::{record_tool_call, OUTCOME_SUCCESS};
use crate::query::{Endpoint, ParamValue, ToolParams};
use crate::validate::{validate_limit, validate_sort, DEFAULT_LIMIT};

/// Name of the latest-news tool.
pub const GET_LATEST_NEWS: &str = "get_latest_news";

/// Name of the sources tool.
pub const GET_SOURCES: &str = "get_sources";

fn default_limit() -> Option<i64> {
    Some(DEFAULT_LIMIT)
}

/// Parameters of `get_latest_news`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct LatestNewsParams {
    /// Search terms to filter news. Use - to exclude terms (e.g. "bitcoin -ethereum").
    #[serde(default)]
    pub keywords: Option<String>,

    /// Include/exclude news sources, comma-separated. Use - to exclude (e.g. "cnn,bbc" or "cnn,-fox").
    #[serde(default)]
    pub sources: Option<String>,

    /// Two-letter country code(s), comma-separated. Use - to exclude (e.g. "us,gb" or "us,-ca").
    #[serde(default)]
    pub countries: Option<String>,

    /// Language code(s), comma-separated. Use - to exclude (e.g. "en,es" or "en,-de").
    #[serde(default)]
    pub languages: Option<String>,

    /// News categories, comma-separated: business, entertainment, general, health, science, sports, technology. Use - to exclude.
    #[serde(default)]
    pub categories: Option<String>,

    /// Date or date range: YYYY-MM-DD or YYYY-MM-DD,YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<String>,

    /// Sort order: published_desc (upstream default), published_asc or popularity.
    #[serde(default)]
    pub sort: Option<String>,

    /// Maximum number of results (1-100). Values outside the range are clamped.
    #[serde(default = "default_limit")]
    pub limit: Option<i64>,

    /// Pagination offset.
    #[serde(default)]
    pub offset: Option<i64>,
}

impl Default for LatestNewsParams {
    fn default() -> Self {
        Self {
            keywords: None,
            sources: None,
            countries: None,
            languages: None,
            categories: None,
            date: None,
            sort: None,
            limit: default_limit(),
            offset: None,
        }
    }
}

impl LatestNewsParams {
    /// Validate and flatten into named parameters for translation.
    pub fn into_tool_params(self) -> Result<ToolParams> {
        let sort = validate_sort(self.sort.as_deref())?;
        let limit = validate_limit(self.limit);

        Ok(vec![
            ("keywords", self.keywords.map(ParamValue::from)),
            ("sources", self.sources.map(ParamValue::from)),
            ("countries", self.countries.map(ParamValue::from)),
            ("languages", self.languages.map(ParamValue::from)),
            ("categories", self.categories.map(ParamValue::from)),
            ("date", self.date.map(ParamValue::from)),
            ("sort", sort.map(|s| ParamValue::from(s.as_str()))),
            ("limit", limit.map(ParamValue::from)),
            ("offset", self.offset.map(ParamValue::from)),
        ])
    }
}

/// Parameters of `get_sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct SourcesParams {
    /// Free-text search term to filter sources.
    #[serde(default)]
    pub search: Option<String>,

    /// Include/exclude specific sources, comma-separated. Use - to exclude.
    #[serde(default)]
    pub sources: Option<String>,

    /// Two-letter country code(s), comma-separated. Use - to exclude.
    #[serde(default)]
    pub countries: Option<String>,

    /// Language code(s), comma-separated. Use - to exclude.
    #[serde(default)]
    pub languages: Option<String>,

    /// News categories, comma-separated: business, entertainment, general, health, science, sports, technology. Use - to exclude.
    #[serde(default)]
    pub categories: Option<String>,

    /// Maximum number of results (1-100). Values outside the range are clamped.
    #[serde(default = "default_limit")]
    pub limit: Option<i64>,

    /// Pagination offset.
    #[serde(default)]
    pub offset: Option<i64>,
}

impl Default for SourcesParams {
    fn default() -> Self {
        Self {
            search: None,
            sources: None,
            countries: None,
            languages: None,
            categories: None,
            limit: default_limit(),
            offset: None,
        }
    }
}

impl SourcesParams {
    pub fn into_tool_params(self) -> Result<ToolParams> {
        let limit = validate_limit(self.limit);

        Ok(vec![
            ("search", self.search.map(ParamValue::from)),
            ("sources", self.sources.map(ParamValue::from)),
            ("countries", self.countries.map(ParamValue::from)),
            ("languages", self.languages.map(ParamValue::from)),
            ("categories", self.categories.map(ParamValue::from)),
            ("limit", limit.map(ParamValue::from)),
            ("offset", self.offset.map(ParamValue::from)),
        ])
    }
}

/// Fetch the most recent news stories.
pub async fn get_latest_news(client: &MediastackClient, params: LatestNewsParams) -> Result<Value> {
    run_tool(client, GET_LATEST_NEWS, Endpoint::News, params.into_tool_params()).await
}

/// List available news sources.
pub async fn get_sources(client: &MediastackClient, params: SourcesParams) -> Result<Value> {
    run_tool(client, GET_SOURCES, Endpoint::Sources, params.into_tool_params()).await
}

async fn run_tool(
    client: &MediastackClient,
    tool: &'static str,
    endpoint: Endpoint,
    params: Result<ToolParams>,
) -> Result<Value> {
    info!(tool, "tool invoked");

    let result = match params {
        Ok(params) => client.call(endpoint, params).await,
        Err(err) => Err(err),
    };

    let outcome = match &result {
        Ok(_) => OUTCOME_SUCCESS,
        Err(err) => err.kind().as_str(),
    };
    record_tool_call(tool, outcome);
    result
}

/// Entry in the static tool table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: Endpoint,
}

/// Every tool exposed by this crate.
pub static TOOLS: [ToolDefinition; 2] = [
    ToolDefinition {
        name: GET_LATEST_NEWS,
        description: "Fetches the most recent news stories from mediastack, \
                      filtered by keywords, sources, countries, languages, categories and date.",
        endpoint: Endpoint::News,
    },
    ToolDefinition {
        name: GET_SOURCES,
        description: "Lists available news sources from mediastack, \
                      filtered by search term, countries, languages and categories.",
        endpoint: Endpoint::Sources,
    },
];

/// Look up a tool by its exact name.
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|tool| tool.name == name)
}

#[cfg(feature = "mcp")]
impl ToolDefinition {
    /// JSON Schema describing this tool's arguments.
    pub fn input_schema(&self) -> Value {
        let schema = match self.endpoint {
            Endpoint::News => schemars::schema_for!(LatestNewsParams),
            Endpoint::Sources => schemars::schema_for!(SourcesParams),
        };
        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}))
    }
}
