//! Translation of validated tool parameters into an upstream query string.

use std::fmt;

use tracing::debug;

use crate::credential::{mask_secret, CredentialSource, API_KEY_ENV};
use crate::error::{Error, Result};

/// Query parameter carrying the upstream credential.
pub const ACCESS_KEY_PARAM: &str = "access_key";

/// Upstream REST endpoints wrapped by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    News,
    Sources,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::News => "news",
            Endpoint::Sources => "sources",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A scalar tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl ParamValue {
    fn to_query_value(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

/// Named, possibly absent parameters of one tool invocation, in call order.
pub type ToolParams = Vec<(&'static str, Option<ParamValue>)>;

/// Query pairs sent to the upstream API.
///
/// `Debug` masks the access key so the query can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pairs: Vec<(String, String)>,
}

impl UpstreamQuery {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Query pairs with the access key masked.
    pub fn redacted(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(k, v)| {
                if k == ACCESS_KEY_PARAM {
                    (k.clone(), mask_secret(v))
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect()
    }
}

impl fmt::Debug for UpstreamQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamQuery")
            .field("pairs", &self.redacted())
            .finish()
    }
}

/// Build the upstream query for `endpoint` from validated parameters.
///
/// Absent parameters are dropped entirely and the access key is appended
/// last. The credential is looked up here, at call time, and its absence is
/// reported as [`Error::Configuration`].
pub fn translate(
    endpoint: Endpoint,
    params: ToolParams,
    credentials: &dyn CredentialSource,
) -> Result<UpstreamQuery> {
    let access_key = credentials.access_key().ok_or_else(|| {
        Error::configuration(format!("{} environment variable is required", API_KEY_ENV))
    })?;

    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.to_query_value())))
        .collect();
    pairs.push((ACCESS_KEY_PARAM.to_string(), access_key));

    let query = UpstreamQuery { pairs };
    debug!(endpoint = %endpoint, query = ?query, "translated upstream query");
    Ok(query)
}
