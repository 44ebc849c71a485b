//! Configuration loading and resolution.
//!
//! Every value comes from a lookup function so callers can load from the
//! process environment ([`env_lookup`]) or from a fixed map in tests.
//! CLI flags take precedence over the environment.

use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_ACCOUNT_NAME: &str = "DATALAKE_ACCOUNT_NAME";
pub const ENV_ACCOUNT_KEY: &str = "DATALAKE_ACCOUNT_KEY";
pub const ENV_ENDPOINT: &str = "DATALAKE_ENDPOINT";
pub const ENV_CONTAINER: &str = "WCL_CONTAINER";
pub const ENV_SOURCE_URL: &str = "WCL_SOURCE_URL";
pub const ENV_FUNCTION_KEY: &str = "WCL_FUNCTION_KEY";
pub const ENV_PORT: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

/// Zone statistics page for the current Mythic raid tier.
pub const DEFAULT_SOURCE_URL: &str = "https://www.warcraftlogs.com/zone/statistics/42?class=Any";
pub const DEFAULT_CONTAINER: &str = "warcraft-logs-data";
pub const DEFAULT_PORT: u16 = 7071;
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Read a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Non-empty value of `name`, trimmed.
fn lookup_non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Where to scrape from and where to publish to.
#[derive(Debug, Clone, PartialEq)]
pub struct ImporterConfig {
    pub source_url: String,
    pub container: String,
    pub fetch_timeout: Duration,
}

impl ImporterConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_url = lookup_non_empty(&lookup, ENV_SOURCE_URL)
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        url::Url::parse(&source_url).map_err(|e| ConfigError::InvalidVar {
            name: ENV_SOURCE_URL,
            reason: e.to_string(),
        })?;

        let container = lookup_non_empty(&lookup, ENV_CONTAINER)
            .unwrap_or_else(|| DEFAULT_CONTAINER.to_string());

        Ok(Self {
            source_url,
            container,
            fetch_timeout: FETCH_TIMEOUT,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

/// Data Lake credentials. Both account name and key are mandatory.
#[derive(Clone, PartialEq)]
pub struct StorageConfig {
    pub account_name: String,
    pub account_key: String,
    pub endpoint: String,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StorageConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let account_name = lookup_non_empty(&lookup, ENV_ACCOUNT_NAME)
            .ok_or(ConfigError::MissingVar(ENV_ACCOUNT_NAME))?;
        let account_key = lookup_non_empty(&lookup, ENV_ACCOUNT_KEY)
            .ok_or(ConfigError::MissingVar(ENV_ACCOUNT_KEY))?;

        let endpoint = lookup_non_empty(&lookup, ENV_ENDPOINT)
            .unwrap_or_else(|| format!("https://{account_name}.dfs.core.windows.net"));
        url::Url::parse(&endpoint).map_err(|e| ConfigError::InvalidVar {
            name: ENV_ENDPOINT,
            reason: e.to_string(),
        })?;

        Ok(Self {
            account_name,
            account_key,
            endpoint,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

/// Resolve the listen port: flag > `FUNCTIONS_CUSTOMHANDLER_PORT` > default.
pub fn resolve_port(
    explicit: Option<u16>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<u16, ConfigError> {
    if let Some(port) = explicit {
        return Ok(port);
    }
    match lookup_non_empty(&lookup, ENV_PORT) {
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
            name: ENV_PORT,
            reason: e.to_string(),
        }),
        None => Ok(DEFAULT_PORT),
    }
}

/// Resolve the trigger key: flag > `WCL_FUNCTION_KEY`.
pub fn resolve_function_key(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| lookup_non_empty(&lookup, ENV_FUNCTION_KEY))
}
