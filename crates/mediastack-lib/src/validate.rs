//! Parameter validation applied before a request is translated.
//!
//! Only `limit` and `sort` are checked here. Country, language, category and
//! date strings are forwarded as-is; the upstream API validates their syntax.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Smallest `limit` the upstream API accepts.
pub const MIN_LIMIT: i64 = 1;

/// Largest `limit` the upstream API accepts.
pub const MAX_LIMIT: i64 = 100;

/// `limit` applied when the caller omits it.
pub const DEFAULT_LIMIT: i64 = 25;

/// Clamp a page size into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Sort orders accepted by the `news` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PublishedDesc,
    PublishedAsc,
    Popularity,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [
        SortOrder::PublishedDesc,
        SortOrder::PublishedAsc,
        SortOrder::Popularity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PublishedDesc => "published_desc",
            SortOrder::PublishedAsc => "published_asc",
            SortOrder::Popularity => "popularity",
        }
    }

    fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_argument(
                    "sort",
                    format!(
                        "invalid sort option '{}'. Must be one of: {}",
                        s,
                        Self::allowed_values()
                    ),
                )
            })
    }
}

/// Validate an optional `sort` value, returning the canonical wire form.
pub fn validate_sort(sort: Option<&str>) -> Result<Option<SortOrder>> {
    sort.map(str::parse::<SortOrder>).transpose()
}

/// Clamp an optional `limit`. Absent stays absent.
pub fn validate_limit(limit: Option<i64>) -> Option<i64> {
    limit.map(clamp_limit)
}
