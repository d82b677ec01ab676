//! Listener configuration.

/// Default value for `SERVICE_PORT`.
pub const DEFAULT_PORT: u16 = 8080;

/// Default value for `SERVICE_HOST`.
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Read `SERVICE_HOST` and `SERVICE_PORT`; unparsable ports fall back to the default.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SERVICE_HOST").ok(),
            std::env::var("SERVICE_PORT").ok(),
        )
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = port
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { host, port }
    }

    /// `host:port` suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_values(None, None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_and_bad_port() {
        let config = ServiceConfig::from_values(Some("127.0.0.1".into()), Some("9090".into()));
        assert_eq!(config.bind_address(), "127.0.0.1:9090");

        let config = ServiceConfig::from_values(Some("  ".into()), Some("http".into()));
        assert_eq!(config, ServiceConfig::default());
    }
}
