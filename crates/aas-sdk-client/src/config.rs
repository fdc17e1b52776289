//! Connection settings for one remote service instance.

use std::collections::BTreeMap;
use std::time::Duration;

/// Base path used when a configuration carries an empty one.
pub const DEFAULT_BASE_PATH: &str = "http://localhost:8081";

/// Settings identifying one remote service (registry, repository, ...).
///
/// Configurations are plain values: code that needs to talk to a different
/// host builds a new one with [`Configuration::rebased`] instead of
/// mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URL of the service (e.g., <http://localhost:8081>)
    pub base_path: String,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Optional bearer token for authentication
    pub bearer_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            headers: BTreeMap::new(),
            bearer_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Configuration {
    /// Configuration for `base_path` with default settings.
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Base path without trailing slash, falling back to
    /// [`DEFAULT_BASE_PATH`] when empty.
    #[must_use]
    pub fn effective_base_path(&self) -> &str {
        let trimmed = self.base_path.trim_end_matches('/');
        if trimmed.is_empty() {
            DEFAULT_BASE_PATH
        } else {
            trimmed
        }
    }

    /// Copy of this configuration pointed at another base path.
    ///
    /// Headers, token, and timeout carry over.
    #[must_use]
    pub fn rebased(&self, base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..self.clone()
        }
    }

    /// Absolute URL of `path` (which must start with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.effective_base_path())
    }
}
