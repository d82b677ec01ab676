//! Core library for exposing the mediastack news API as callable tools.
//!
//! A tool call flows through three stages:
//!
//! 1. [`validate`]: clamp `limit`, check `sort` against the allowed set
//! 2. [`query`]: drop absent parameters and attach the access key
//! 3. [`client`]: one bounded GET against the upstream endpoint
//!
//! The access key is resolved through a [`CredentialSource`] only when a
//! request is dispatched, so the tool table can be listed without one.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod metrics;
pub mod query;
pub mod tools;
pub mod validate;

pub use client::MediastackClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use credential::{mask_secret, CredentialSource, EnvCredential, StaticCredential, API_KEY_ENV};
pub use error::{Error, ErrorKind, Result};
pub use query::{translate, Endpoint, ParamValue, ToolParams, UpstreamQuery, ACCESS_KEY_PARAM};
pub use tools::{
    find_tool, get_latest_news, get_sources, LatestNewsParams, SourcesParams, ToolDefinition,
    GET_LATEST_NEWS, GET_SOURCES, TOOLS,
};
pub use validate::{clamp_limit, SortOrder, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
