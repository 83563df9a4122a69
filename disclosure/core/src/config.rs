//! TOML Configuration File Support
//!
//! Default timings for hosts, loaded from
//! `$XDG_CONFIG_HOME/finfund/disclosure.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [typewriter]
//! char_delay_ms = 20
//! start_delay_ms = 300
//!
//! [gauge]
//! duration_ms = 1200
//! refresh_rate_hz = 60
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Overrides |
//! |---|---|
//! | `FINFUND_CHAR_DELAY_MS` | `typewriter.char_delay_ms` |
//! | `FINFUND_START_DELAY_MS` | `typewriter.start_delay_ms` |
//! | `FINFUND_GAUGE_DURATION_MS` | `gauge.duration_ms` |
//! | `FINFUND_REFRESH_RATE_HZ` | `gauge.refresh_rate_hz` |
//!
//! Millisecond values are signed in the file so that a negative delay is
//! reported as an error rather than a parse failure deep inside TOML.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gauge::DEFAULT_GAUGE_DURATION;
use crate::reveal::RevealTiming;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Typewriter section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterToml {
    /// Interval between characters in milliseconds
    pub char_delay_ms: Option<i64>,

    /// Delay before the first character in milliseconds
    pub start_delay_ms: Option<i64>,
}

/// Gauge section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeToml {
    /// Count-up duration in milliseconds
    pub duration_ms: Option<i64>,

    /// Frame source refresh rate
    pub refresh_rate_hz: Option<u32>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureToml {
    /// Typewriter section
    pub typewriter: TypewriterToml,

    /// Gauge section
    pub gauge: GaugeToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved host configuration
#[derive(Clone, Debug)]
pub struct DisclosureConfig {
    /// Typewriter cadence
    pub reveal: RevealTiming,

    /// Gauge count-up duration
    pub gauge_duration: Duration,

    /// Refresh rate of the production frame source
    pub refresh_rate_hz: u32,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            reveal: RevealTiming::pitch_coach(),
            gauge_duration: DEFAULT_GAUGE_DURATION,
            refresh_rate_hz: 60,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl DisclosureConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the highest-priority value came from
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/finfund/disclosure.toml` or
/// `~/.config/finfund/disclosure.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("finfund").join("disclosure.toml"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// any value is out of range. A missing file is not an error.
pub fn load_config() -> Result<DisclosureConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any value is
/// out of range.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<DisclosureConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with a custom environment lookup
///
/// [`load_config_from_path`] passes the process environment; tests pass a
/// map so they do not race on process-wide variables.
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<E>(
    path: Option<PathBuf>,
    env: E,
) -> Result<DisclosureConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let mut config = DisclosureConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: DisclosureToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;

    Ok(config)
}

fn millis(key: &str, value: i64) -> Result<Duration, ConfigError> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::ValidationError(format!("{key} must not be negative (got {value})")))
}

fn refresh_rate(key: &str, value: u32) -> Result<u32, ConfigError> {
    if (1..=1000).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ValidationError(format!(
            "{key} must be between 1 and 1000 (got {value})"
        )))
    }
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(
    config: &mut DisclosureConfig,
    toml: &DisclosureToml,
) -> Result<(), ConfigError> {
    if let Some(ms) = toml.typewriter.char_delay_ms {
        config.reveal.char_delay = millis("typewriter.char_delay_ms", ms)?;
    }
    if let Some(ms) = toml.typewriter.start_delay_ms {
        config.reveal.start_delay = millis("typewriter.start_delay_ms", ms)?;
    }
    if let Some(ms) = toml.gauge.duration_ms {
        config.gauge_duration = millis("gauge.duration_ms", ms)?;
    }
    if let Some(hz) = toml.gauge.refresh_rate_hz {
        config.refresh_rate_hz = refresh_rate("gauge.refresh_rate_hz", hz)?;
    }
    Ok(())
}

/// Apply environment variable overrides to the config
///
/// Unparseable values are logged and ignored; parseable but out-of-range
/// values are errors.
fn apply_env_config<E>(config: &mut DisclosureConfig, env: E) -> Result<(), ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let parse_i64 = |key: &str| -> Option<i64> {
        let raw = env(key)?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "Ignoring unparseable environment value");
                None
            }
        }
    };

    if let Some(ms) = parse_i64("FINFUND_CHAR_DELAY_MS") {
        config.reveal.char_delay = millis("FINFUND_CHAR_DELAY_MS", ms)?;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_i64("FINFUND_START_DELAY_MS") {
        config.reveal.start_delay = millis("FINFUND_START_DELAY_MS", ms)?;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_i64("FINFUND_GAUGE_DURATION_MS") {
        config.gauge_duration = millis("FINFUND_GAUGE_DURATION_MS", ms)?;
        config.source = ConfigSource::Env;
    }
    if let Some(hz) = parse_i64("FINFUND_REFRESH_RATE_HZ") {
        let hz = u32::try_from(hz).unwrap_or(0);
        config.refresh_rate_hz = refresh_rate("FINFUND_REFRESH_RATE_HZ", hz)?;
        config.source = ConfigSource::Env;
    }
    Ok(())
}
