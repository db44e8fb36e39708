//! Configuration file and environment overrides.
//!
//! The file is JSON at `<config_dir>/thumbbot/config.json`. Every field is
//! optional; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::context::FetchSettings;
use crate::error::ConfigError;
use crate::host::http::DEFAULT_TIMEOUT_SECS;
use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_RETRIES, RetryPolicy};
use crate::variant::DEFAULT_SIZE_BUDGET;

/// Overrides `max_retries`.
pub const ENV_MAX_RETRIES: &str = "THUMBBOT_MAX_RETRIES";

/// Overrides `size_budget_bytes`.
pub const ENV_SIZE_BUDGET: &str = "THUMBBOT_SIZE_BUDGET";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the first rate-limited attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay in milliseconds.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Backoff ceiling in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Largest video variant to pick, in bytes.
    #[serde(default = "default_size_budget_bytes")]
    pub size_budget_bytes: u64,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[allow(clippy::cast_possible_truncation)]
fn default_initial_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}

#[allow(clippy::cast_possible_truncation)]
fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY.as_millis() as u64
}

fn default_size_budget_bytes() -> u64 {
    DEFAULT_SIZE_BUDGET
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            size_budget_bytes: default_size_budget_bytes(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thumbbot")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Applies `THUMBBOT_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup; unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            match raw.trim().parse() {
                Ok(value) => self.max_retries = value,
                Err(_) => warn!(var = ENV_MAX_RETRIES, value = %raw, "Ignoring invalid override"),
            }
        }
        if let Some(raw) = lookup(ENV_SIZE_BUDGET) {
            match raw.trim().parse() {
                Ok(value) => self.size_budget_bytes = value,
                Err(_) => warn!(var = ENV_SIZE_BUDGET, value = %raw, "Ignoring invalid override"),
            }
        }
    }

    /// Converts to fetch settings, rejecting values the engine cannot use.
    pub fn to_settings(&self) -> Result<FetchSettings, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(ConfigError::Invalid {
                field: "initial_delay_ms",
                reason: format!("exceeds max_delay_ms ({})", self.max_delay_ms),
            });
        }

        let retry = RetryPolicy::new(self.max_retries)
            .with_base_delay(Duration::from_millis(self.initial_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms));

        Ok(FetchSettings::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(retry)
            .with_size_budget(self.size_budget_bytes))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_retries": 2, "size_budget_bytes": 1048576}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.size_budget_bytes, 1_048_576);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 30_000);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_MAX_RETRIES, "7"), (ENV_SIZE_BUDGET, "not-a-number")]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.max_retries, 7);
        assert_eq!(config.size_budget_bytes, DEFAULT_SIZE_BUDGET);
    }

    #[test]
    fn test_to_settings() {
        let config = Config {
            max_retries: 3,
            initial_delay_ms: 250,
            ..Config::default()
        };
        let settings = config.to_settings().unwrap();

        assert_eq!(settings.retry.max_retries, 3);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(250));
        assert_eq!(settings.retry.max_delay, Duration::from_secs(30));
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_to_settings_rejects_inverted_delays() {
        let config = Config {
            initial_delay_ms: 60_000,
            ..Config::default()
        };
        assert!(matches!(
            config.to_settings(),
            Err(ConfigError::Invalid { field: "initial_delay_ms", .. })
        ));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with("thumbbot/config.json"));
    }
}
