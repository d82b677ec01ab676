use std::env;
use std::time::Duration;

use tracing::warn;

/// Production base URL of the mediastack REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.mediastack.com/v1";

/// Environment variable overriding the base URL (tests, proxies).
pub const BASE_URL_ENV: &str = "MEDIASTACK_BASE_URL";

/// Environment variable overriding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "MEDIASTACK_TIMEOUT_SECS";

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds applied to timeouts read from the environment.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the upstream HTTP client.
///
/// Holds no credential; see [`crate::CredentialSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Read `MEDIASTACK_BASE_URL` and `MEDIASTACK_TIMEOUT_SECS`.
    ///
    /// The timeout is clamped into `[MIN_TIMEOUT, MAX_TIMEOUT]`; unparsable
    /// values fall back to [`DEFAULT_TIMEOUT`].
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var(TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => clamp_timeout(Duration::from_secs(secs)),
                Err(_) => {
                    warn!(value = %raw, "ignoring unparsable {}", TIMEOUT_ENV);
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };

        Self { base_url, timeout }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the timeout. A zero duration is replaced by the default so
    /// that calls are always bounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Full URL for an endpoint path segment.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Clamp a timeout into the range accepted from configuration.
pub fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT)
}
