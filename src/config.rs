use std::{collections::HashMap, env, path::Path, time::Duration};

use derive_getters::Getters;

use crate::error::QuoteError;

pub const DEFAULT_BASE_URL: &str = "http://finance.yahoo.com/webservice/v1/symbols";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

pub const ENV_BASE_URL: &str = "FX_BASE_URL";
pub const ENV_POLL_INTERVAL_SECS: &str = "FX_POLL_INTERVAL_SECS";
pub const ENV_CHANNEL_CAPACITY: &str = "FX_CHANNEL_CAPACITY";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "FX_REQUEST_TIMEOUT_SECS";

/// Polling policy for a quote stream.
///
/// Defaults match the public endpoint: a fifteen second period and no
/// request timeout beyond what the HTTP client enforces.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct FxConfig {
    base_url: String,
    poll_interval: Duration,
    channel_capacity: usize,
    request_timeout: Option<Duration>,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            request_timeout: None,
        }
    }
}

impl FxConfig {
    /// Reads `.env` if one exists, then the process environment.
    pub fn from_env() -> Result<Self, QuoteError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads a single dotenv file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let iter = dotenv::from_path_iter(path)
            .map_err(|e| QuoteError::Config(format!("{}: {}", path.display(), e)))?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| QuoteError::Config(format!("{}: {}", path.display(), e)))?;
            vars.insert(key, value);
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuoteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = lookup(ENV_POLL_INTERVAL_SECS) {
            config = config.with_poll_interval(parse_secs(ENV_POLL_INTERVAL_SECS, &secs)?);
        }
        if let Some(capacity) = lookup(ENV_CHANNEL_CAPACITY) {
            let capacity = capacity.trim().parse::<usize>().map_err(|e| {
                QuoteError::Config(format!("{} '{}': {}", ENV_CHANNEL_CAPACITY, capacity, e))
            })?;
            config = config.with_channel_capacity(capacity);
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            config =
                config.with_request_timeout(Some(parse_secs(ENV_REQUEST_TIMEOUT_SECS, &secs)?));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.base_url.trim().is_empty() {
            return Err(QuoteError::Config("base url must not be empty".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(QuoteError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(QuoteError::Config(
                "channel capacity must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(QuoteError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, QuoteError> {
    let invalid = || QuoteError::Config(format!("{} '{}': not a number of seconds", key, value));

    let secs = value.trim().parse::<f64>().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}
