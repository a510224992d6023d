use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{ENV_API_BASE_URL, ENV_API_KEY, ENV_API_TIMEOUT_SECS, HISTORY_FILE};
use crate::error::{Error, Result};

/// Upstream weather API settings, fixed for the lifetime of a client.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// `None` leaves outbound requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Base URL without a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub history_path: PathBuf,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_BASE_URL).unwrap_or_default();
        let api_key = lookup(ENV_API_KEY).unwrap_or_default();

        if base_url.is_empty() {
            tracing::warn!("{} is not set; weather lookups will fail", ENV_API_BASE_URL);
        }
        if api_key.is_empty() {
            tracing::warn!("{} is not set", ENV_API_KEY);
        }

        let request_timeout = match lookup(ENV_API_TIMEOUT_SECS) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                api_key,
                request_timeout,
            },
            history_path: PathBuf::from(HISTORY_FILE),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Config(format!(
            "{} must be an integer > 0, got {:?}",
            ENV_API_TIMEOUT_SECS, raw
        ))),
    }
}
