//! Lazy credential lookup.
//!
//! A [`CredentialSource`] is consulted only when a request is about to be
//! sent, so building a client or listing tools never requires a key.

use std::fmt;

/// Environment variable holding the mediastack access key.
pub const API_KEY_ENV: &str = "MEDIASTACK_API_KEY";

/// Supplies the upstream access key at call time.
pub trait CredentialSource: Send + Sync + fmt::Debug {
    /// Return the access key, or `None` when none is configured.
    fn access_key(&self) -> Option<String>;
}

/// Reads the access key from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialSource for EnvCredential {
    fn access_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// A fixed credential supplied at construction time.
#[derive(Clone)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    /// A source that never yields a key.
    pub fn missing() -> Self {
        Self(None)
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticCredential")
            .field(&self.0.as_deref().map(mask_secret))
            .finish()
    }
}

impl CredentialSource for StaticCredential {
    fn access_key(&self) -> Option<String> {
        self.0
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Mask a secret for logging, keeping at most a 4-character prefix.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_keeps_short_prefix() {
        assert_eq!(mask_secret("abcdef123456"), "abcd****");
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "****");
    }

    #[test]
    fn test_static_credential_debug_is_masked() {
        let cred = StaticCredential::new("supersecretkey");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("supe****"));
        assert!(!debug.contains("supersecretkey"));
    }

    #[test]
    fn test_static_credential_blank_counts_as_missing() {
        assert_eq!(StaticCredential::new("   ").access_key(), None);
        assert_eq!(StaticCredential::missing().access_key(), None);
        assert_eq!(
            StaticCredential::new(" key ").access_key().as_deref(),
            Some("key")
        );
    }

    #[test]
    fn test_env_credential_unset_var() {
        let cred = EnvCredential::new("MEDIASTACK_TEST_CREDENTIAL_NEVER_SET");
        assert_eq!(cred.access_key(), None);
        assert_eq!(cred.var(), "MEDIASTACK_TEST_CREDENTIAL_NEVER_SET");
    }

    #[test]
    fn test_env_credential_default_var() {
        assert_eq!(EnvCredential::default().var(), API_KEY_ENV);
    }
}
