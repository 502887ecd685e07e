//! Client configuration

use shared::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default delay before a typed search term is committed.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// How a list commits its search term.
///
/// One discipline per list; the two are never combined on the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Commit on explicit submit (button or Enter)
    #[default]
    Submit,
    /// Commit automatically once typing pauses for the given delay
    Debounced(Duration),
}

/// Client configuration for connecting to the HR backend
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Rows per list page
    pub page_size: u32,

    /// Search discipline for list views
    pub search_mode: SearchMode,

    /// Route the client is sent to when the credential is rejected
    pub login_route: String,

    /// Route shown after a successful login
    pub home_route: String,

    /// File backing the persisted credential; in-memory when unset
    pub credential_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
            search_mode: SearchMode::Submit,
            login_route: "/auth".to_string(),
            home_route: "/".to_string(),
            credential_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// | Variable                  | Default    |
    /// |---------------------------|------------|
    /// | `HR_API_URL`              | required   |
    /// | `HR_REQUEST_TIMEOUT_SECS` | 30         |
    /// | `HR_PAGE_SIZE`            | 5          |
    /// | `HR_SEARCH_MODE`          | `submit`   |
    /// | `HR_SEARCH_DEBOUNCE_MS`   | 1500       |
    /// | `HR_LOGIN_ROUTE`          | `/auth`    |
    /// | `HR_HOME_ROUTE`           | `/`        |
    /// | `HR_CREDENTIAL_PATH`      | in-memory  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var("HR_API_URL").ok_or(ConfigError::Missing("HR_API_URL"))?;
        let mut config = Self::new(base_url);

        if let Some(v) = var("HR_REQUEST_TIMEOUT_SECS") {
            config.timeout = parse("HR_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("HR_PAGE_SIZE") {
            config.page_size = parse("HR_PAGE_SIZE", &v)?;
            if config.page_size == 0 {
                return Err(ConfigError::Invalid {
                    key: "HR_PAGE_SIZE",
                    value: v,
                });
            }
        }

        let debounce = match var("HR_SEARCH_DEBOUNCE_MS") {
            Some(v) => Duration::from_millis(parse("HR_SEARCH_DEBOUNCE_MS", &v)?),
            None => DEFAULT_SEARCH_DEBOUNCE,
        };
        config.search_mode = match var("HR_SEARCH_MODE").as_deref().map(str::trim) {
            None | Some("submit") => SearchMode::Submit,
            Some("debounced") => SearchMode::Debounced(debounce),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "HR_SEARCH_MODE",
                    value: other.to_string(),
                });
            }
        };

        if let Some(v) = var("HR_LOGIN_ROUTE") {
            config.login_route = v;
        }
        if let Some(v) = var("HR_HOME_ROUTE") {
            config.home_route = v;
        }
        config.credential_path = var("HR_CREDENTIAL_PATH").map(PathBuf::from);

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_home_route(mut self, route: impl Into<String>) -> Self {
        self.home_route = route.into();
        self
    }

    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
