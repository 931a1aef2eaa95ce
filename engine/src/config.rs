//! Engine Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::tournament::SlugResolver;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidValue {
                var: "FAIRWAY_LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log output format (default: json)
    pub log_format: LogFormat,

    /// Cap on slug candidates checked per resolution (default: unbounded)
    pub slug_max_attempts: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FAIRWAY_LOG_FORMAT`: `json` or `pretty` (default: json)
    /// - `FAIRWAY_SLUG_MAX_ATTEMPTS`: positive integer (default: unset, unbounded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = var("FAIRWAY_LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        let slug_max_attempts = var("FAIRWAY_SLUG_MAX_ATTEMPTS")
            .map(|v| parse_max_attempts(&v))
            .transpose()?;

        Ok(Self {
            log_format,
            slug_max_attempts,
        })
    }

    /// Slug resolver honoring the configured attempt cap.
    #[must_use]
    pub const fn slug_resolver(&self) -> SlugResolver {
        SlugResolver::new(self.slug_max_attempts)
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub const fn default_for_test() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            slug_max_attempts: Some(100),
        }
    }
}

fn parse_max_attempts(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            var: "FAIRWAY_SLUG_MAX_ATTEMPTS",
            value: value.to_string(),
        }),
    }
}
