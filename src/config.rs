//! Backend connection settings parsed from environment variables.

use std::time::Duration;

pub const PRODUCTION_BASE_URL: &str = "https://api.automationscout.com";
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3003";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend base URL is empty")]
    EmptyBaseUrl,
    #[error("backend base URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Production,
    Development,
}

impl Deployment {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "production" || v == "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl GatewayConfig {
    /// Build a config pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        })
    }

    /// Build typed gateway config from environment variables.
    ///
    /// Optional:
    /// - `SCOUT_API_BASE_URL`: explicit backend URL, wins over `SCOUT_ENV`
    /// - `SCOUT_ENV`: `production` selects the hosted API, anything else localhost
    /// - `SCOUT_API_TIMEOUT_MS`: default 10000
    /// - `SCOUT_API_CONNECT_TIMEOUT_MS`: default 5000
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved base URL is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let deployment = Deployment::parse(env_var("SCOUT_ENV").as_deref());
        let base_url = env_var("SCOUT_API_BASE_URL").unwrap_or_else(|| deployment.default_base_url().to_owned());

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            request_timeout: Duration::from_millis(env_parse("SCOUT_API_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)),
            connect_timeout: Duration::from_millis(env_parse(
                "SCOUT_API_CONNECT_TIMEOUT_MS",
                DEFAULT_CONNECT_TIMEOUT_MS,
            )),
        })
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Join a backend-relative path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match env_var(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        _ => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
