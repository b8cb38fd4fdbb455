//! Dashboard configuration.
//!
//! Values come from three layers, lowest precedence first: built-in
//! defaults, `AQDASH_*` environment variables, then command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cli::CliOverrides;
use crate::client::DEFAULT_BASE_URL;

pub const ENV_BASE_URL: &str = "AQDASH_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "AQDASH_TIMEOUT_SECS";
pub const ENV_REFRESH_SECS: &str = "AQDASH_REFRESH_SECS";
pub const ENV_DISTINGUISH_EMPTY: &str = "AQDASH_DISTINGUISH_EMPTY";
pub const ENV_LOG_FILE: &str = "AQDASH_LOG_FILE";

/// Largest accepted timeout or refresh interval (one day).
pub const MAX_SECONDS: u64 = 86_400;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{source_name}: '{value}' is not a whole number of seconds")]
    InvalidSeconds { source_name: String, value: String },

    #[error("{source_name}: {value} seconds is more than the maximum of {max}")]
    SecondsOutOfRange {
        source_name: String,
        value: u64,
        max: u64,
    },

    #[error("{source_name}: '{value}' is not a boolean (use 1/0, true/false, yes/no)")]
    InvalidBool { source_name: String, value: String },

    #[error("{source_name}: '{value}' is not an http(s) URL")]
    InvalidUrl { source_name: String, value: String },
}

/// Runtime configuration for the dashboard.
///
/// # Example
///
/// ```ignore
/// use aqdash::startup::DashboardConfig;
/// use std::time::Duration;
///
/// let config = DashboardConfig::default()
///     .with_base_url("http://localhost:9000")
///     .with_refresh_interval(Some(Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Backend base URL (default: http://127.0.0.1:8000)
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Auto-refresh cadence; `None` fetches once at startup
    pub refresh_interval: Option<Duration>,
    /// Render an empty forecast as "No forecast data available"
    pub distinguish_empty_forecast: bool,
    /// How often the event loop wakes to redraw
    pub tick_rate: Duration,
    /// Where tracing output goes
    pub log_file: PathBuf,
    /// Width and height of the frame printed by `--print`
    pub print_size: (u16, u16),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            refresh_interval: None,
            distinguish_empty_forecast: false,
            tick_rate: Duration::from_millis(250),
            log_file: default_log_file(),
            print_size: (100, 30),
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_distinguish_empty_forecast(mut self, distinguish: bool) -> Self {
        self.distinguish_empty_forecast = distinguish;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_print_size(mut self, width: u16, height: u16) -> Self {
        self.print_size = (width, height);
        self
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env(|name| std::env::var(name).ok())
    }

    /// Overlay variables supplied by `lookup` (unset variables are skipped).
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = non_empty(lookup(ENV_BASE_URL)) {
            self.base_url = parse_base_url(ENV_BASE_URL, &url)?;
        }
        if let Some(secs) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            self.request_timeout = parse_seconds(ENV_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = non_empty(lookup(ENV_REFRESH_SECS)) {
            self.refresh_interval = parse_seconds(ENV_REFRESH_SECS, &secs)?;
        }
        if let Some(flag) = non_empty(lookup(ENV_DISTINGUISH_EMPTY)) {
            self.distinguish_empty_forecast = parse_bool(ENV_DISTINGUISH_EMPTY, &flag)?;
        }
        if let Some(path) = non_empty(lookup(ENV_LOG_FILE)) {
            self.log_file = PathBuf::from(path);
        }
        Ok(self)
    }

    /// Overlay command-line flags.
    pub fn apply_overrides(mut self, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        if let Some(url) = &overrides.base_url {
            self.base_url = parse_base_url("--base-url", url)?;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.request_timeout = checked_seconds("--timeout", secs)?;
        }
        if let Some(secs) = overrides.refresh_secs {
            self.refresh_interval = checked_seconds("--refresh", secs)?;
        }
        if overrides.distinguish_empty {
            self.distinguish_empty_forecast = true;
        }
        Ok(self)
    }
}

/// `<cache dir>/aqdash/aqdash.log`, or the temp dir when there is no cache dir.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("aqdash")
        .join("aqdash.log")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Zero disables the setting.
fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_seconds(source_name: &str, value: &str) -> Result<Option<Duration>, ConfigError> {
    let secs = value.parse::<u64>().map_err(|_| ConfigError::InvalidSeconds {
        source_name: source_name.to_string(),
        value: value.to_string(),
    })?;
    checked_seconds(source_name, secs)
}

/// Like [`seconds`], rejecting values above [`MAX_SECONDS`].
fn checked_seconds(source_name: &str, secs: u64) -> Result<Option<Duration>, ConfigError> {
    if secs > MAX_SECONDS {
        return Err(ConfigError::SecondsOutOfRange {
            source_name: source_name.to_string(),
            value: secs,
            max: MAX_SECONDS,
        });
    }
    Ok(seconds(secs))
}

fn parse_bool(source_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            source_name: source_name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_base_url(source_name: &str, value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        source_name: source_name.to_string(),
        value: value.to_string(),
    };
    let url = reqwest::Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(value.trim_end_matches('/').to_string())
}
