//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `starhook.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use starhook_app::time_sources::NOW_PROVIDER_NAME;
use starhook_domain::time::TimeOfDay;
use starhook_domain::trigger::TimedTriggerSettings;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Polling cadence and sequence identity.
    pub runner: RunnerConfig,
    /// Daily timed trigger.
    pub timed_trigger: TimedTriggerConfig,
    /// Random interval trigger.
    pub interval_trigger: IntervalTriggerConfig,
    /// Virtual equipment and time sources.
    #[serde(rename = "virtual")]
    pub virtual_adapter: VirtualConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// How often the triggers are polled, and in which sequence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Seconds between two polls.
    pub poll_seconds: u64,
    /// Name reported to triggers as the running sequence.
    pub sequence_name: String,
}

/// Timed trigger toggle and its persisted settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimedTriggerConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: TimedTriggerSettings,
}

/// Interval trigger toggle and optional seed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IntervalTriggerConfig {
    pub enabled: bool,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

/// Virtual adapter settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Register the virtual equipment and time sources.
    pub enabled: bool,
    /// Time of day answered by the virtual `Sunset` source.
    pub sunset: TimeOfDay,
    /// Time of day answered by the virtual `Sunrise` source.
    pub sunrise: TimeOfDay,
}

impl Config {
    /// Load configuration from `starhook.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("starhook.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STARHOOK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("STARHOOK_POLL_SECONDS") {
            if let Ok(seconds) = val.parse() {
                self.runner.poll_seconds = seconds;
            }
        }
        if let Ok(val) = std::env::var("STARHOOK_SEQUENCE") {
            self.runner.sequence_name = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.poll_seconds == 0 {
            return Err(ConfigError::Validation(
                "poll_seconds must be non-zero".to_string(),
            ));
        }
        if self.runner.sequence_name.is_empty() {
            return Err(ConfigError::Validation(
                "sequence_name must not be empty".to_string(),
            ));
        }
        let timed = &self.timed_trigger;
        let manual_time = timed
            .settings
            .selected_provider
            .as_deref()
            .is_none_or(|name| name == NOW_PROVIDER_NAME);
        if timed.enabled && manual_time {
            timed
                .settings
                .time_of_day()
                .map_err(|err| ConfigError::Validation(format!("timed_trigger: {err}")))?;
        }
        Ok(())
    }

    /// Delay between two polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.runner.poll_seconds)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "starhookd=info,starhook_app=info".to_string(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_seconds: 10,
            sequence_name: "Night".to_string(),
        }
    }
}

impl Default for TimedTriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: TimedTriggerSettings::default(),
        }
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sunset: TimeOfDay::new(17, 30, 0).unwrap_or_default(),
            sunrise: TimeOfDay::new(6, 30, 0).unwrap_or_default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
