//! Application configuration
//!
//! Configuration is layered with the `config` crate: built-in defaults, then
//! `config/default.toml`, then `config/{RUN_MODE}.toml`, then `BOOTH__*`
//! environment variables.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

use crate::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub duration: DurationConfig,
}

/// How the operator shell prints records
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Operator shell configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ShellConfig {
    /// Booths created before the first prompt
    #[serde(default = "default_initial_booths")]
    pub initial_booths: Vec<u32>,

    /// Output format for booth info and totals
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_initial_booths() -> Vec<u32> {
    vec![1]
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            initial_booths: default_initial_booths(),
            output: OutputFormat::Text,
        }
    }
}

/// Where call durations come from when the shell registers a call
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DurationConfig {
    /// Smallest random duration in minutes (inclusive)
    #[serde(default = "default_min_minutes")]
    pub min: i64,

    /// Largest random duration in minutes (inclusive)
    #[serde(default = "default_max_minutes")]
    pub max: i64,

    /// Seed for reproducible random durations
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fixed duration for every call; overrides the random range
    #[serde(default)]
    pub fixed: Option<i64>,
}

fn default_min_minutes() -> i64 {
    1
}

fn default_max_minutes() -> i64 {
    10
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            min: default_min_minutes(),
            max: default_max_minutes(),
            seed: None,
            fixed: None,
        }
    }
}

impl DurationConfig {
    /// Reject ranges and fixed values that could produce a non-positive duration
    pub fn validate(&self) -> AppResult<()> {
        if let Some(fixed) = self.fixed {
            if fixed <= 0 {
                return Err(AppError::invalid(format!(
                    "fixed duration must be positive, got {}",
                    fixed
                )));
            }
        }
        if self.min < 1 || self.min > self.max {
            return Err(AppError::invalid(format!(
                "duration range must satisfy 1 <= min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("BOOTH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("shell.initial_booths")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> AppResult<Self> {
        let builder = Self::defaults()?.add_source(File::with_name(path));
        Self::finish(builder)
    }

    /// Load configuration from TOML text
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(contents, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> AppResult<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("shell.output", "text")?
            .set_default("duration.min", default_min_minutes())?
            .set_default("duration.max", default_max_minutes())?)
    }

    fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> AppResult<Self> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.duration.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.shell.initial_booths, vec![1]);
        assert_eq!(config.shell.output, OutputFormat::Text);
        assert_eq!(config.duration.min, 1);
        assert_eq!(config.duration.max, 10);
        assert!(config.duration.fixed.is_none());
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [shell]
            initial_booths = [1, 2, 3]
            output = "json"

            [duration]
            max = 5
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.shell.initial_booths, vec![1, 2, 3]);
        assert_eq!(config.shell.output, OutputFormat::Json);
        assert_eq!(config.duration.min, 1);
        assert_eq!(config.duration.max, 5);
        assert_eq!(config.duration.seed, Some(42));
    }

    #[test]
    fn test_from_file_reads_shipped_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = AppConfig::from_file(path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("config/does-not-exist.toml").unwrap_err();
        assert_eq!(err.error_code(), "config_error");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [duration]
            min = 8
            max = 3
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "invalid_argument");
    }

    #[test]
    fn test_non_positive_fixed_rejected() {
        let config = DurationConfig {
            fixed: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DurationConfig {
            fixed: Some(3),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
