use std::time::Duration;

use thiserror::Error;

/// Convenient result alias for the mediastack library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every failure of a tool call maps onto exactly one variant so callers can
/// branch on [`Error::kind`] instead of parsing messages.
#[derive(Debug, Error)]
pub enum Error {
    /// No credential was available when a call was dispatched.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A parameter failed validation before any network activity.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The outbound call exceeded the configured bound.
    #[error("mediastack API request timed out after {} seconds", format_secs(.timeout))]
    Timeout {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream host could not be reached.
    #[error("failed to connect to mediastack API: {source}")]
    Connectivity {
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response carrying a decodable `{code, message}` error body.
    #[error("mediastack API error [{code}]: {message}")]
    Upstream {
        status: u16,
        code: String,
        message: String,
    },

    /// Non-2xx response without a decodable error body.
    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// 2xx response whose body is not valid JSON.
    #[error("invalid JSON response from mediastack API: {source}")]
    ResponseFormat {
        #[source]
        source: serde_json::Error,
    },

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidArgument,
    Timeout,
    Connectivity,
    Upstream,
    Http,
    ResponseFormat,
    Internal,
}

impl ErrorKind {
    /// Snake-case tag used on the wire (tool failures, problem details, metrics).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Timeout => "timeout_error",
            ErrorKind::Connectivity => "connectivity_error",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::Http => "http_error",
            ErrorKind::ResponseFormat => "response_format_error",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Connectivity { .. } => ErrorKind::Connectivity,
            Error::Upstream { .. } => ErrorKind::Upstream,
            Error::Http { .. } => ErrorKind::Http,
            Error::ResponseFormat { .. } => ErrorKind::ResponseFormat,
            Error::ClientBuild { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Upstream error code, when the upstream body carried one.
    pub fn upstream_code(&self) -> Option<&str> {
        match self {
            Error::Upstream { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status returned by the upstream API, if a response was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } | Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_secs(timeout: &Duration) -> String {
    let secs = timeout.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}", secs as u64)
    } else {
        format!("{:.1}", secs)
    }
}
