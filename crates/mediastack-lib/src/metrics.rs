//! Business metric helpers for tool calls and upstream requests.
//!
//! These go through the `metrics` facade and are no-ops until a recorder is
//! installed (the HTTP service installs a Prometheus one).

use std::time::Duration;

/// Counter of tool invocations, labelled by `tool` and `outcome`.
pub const TOOL_CALLS_TOTAL: &str = "mediastack_tool_calls_total";

/// Histogram of upstream request latency, labelled by `endpoint`.
pub const UPSTREAM_DURATION_SECONDS: &str = "mediastack_upstream_duration_seconds";

/// Outcome label for a tool call that returned upstream data.
pub const OUTCOME_SUCCESS: &str = "success";

/// Record one finished tool call.
///
/// `outcome` is [`OUTCOME_SUCCESS`] or the failing error's kind tag.
pub fn record_tool_call(tool: &str, outcome: &str) {
    metrics::counter!(
        TOOL_CALLS_TOTAL,
        "tool" => tool.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record how long one upstream request took, including failed ones.
pub fn record_upstream_duration(endpoint: &str, elapsed: Duration) {
    metrics::histogram!(
        UPSTREAM_DURATION_SECONDS,
        "endpoint" => endpoint.to_string()
    )
    .record(elapsed.as_secs_f64());
}
