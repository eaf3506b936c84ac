//! Configuration management for demandcast
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Command-line flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::forecast::{TrendForecaster, DEFAULT_PERIODS};
use crate::parser::{Delimiter, ParserOptions, DEFAULT_DATE_COLUMN, DEFAULT_DEMAND_COLUMN};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecast configuration
    pub forecast: ForecastConfig,

    /// Input parsing configuration
    pub input: InputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Forecast-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future days to project
    pub periods: usize,
}

/// Input parsing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header name of the date column
    pub date_column: String,

    /// Header name of the demand column
    pub demand_column: String,

    /// Field delimiter (comma, semicolon, tab, pipe, auto)
    pub delimiter: Delimiter,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            date_column: String::from(DEFAULT_DATE_COLUMN),
            demand_column: String::from(DEFAULT_DEMAND_COLUMN),
            delimiter: Delimiter::Comma,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let periods = std::env::var("DEMANDCAST_PERIODS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.forecast.periods);

        let date_column = std::env::var("DEMANDCAST_DATE_COLUMN")
            .unwrap_or(defaults.input.date_column);

        let demand_column = std::env::var("DEMANDCAST_DEMAND_COLUMN")
            .unwrap_or(defaults.input.demand_column);

        let delimiter = std::env::var("DEMANDCAST_DELIMITER")
            .ok()
            .and_then(|v| v.parse::<Delimiter>().ok())
            .unwrap_or(defaults.input.delimiter);

        let log_level =
            std::env::var("DEMANDCAST_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format =
            std::env::var("DEMANDCAST_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            forecast: ForecastConfig { periods },
            input: InputConfig {
                date_column,
                demand_column,
                delimiter,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.forecast.periods == 0 {
            anyhow::bail!("periods must be greater than 0");
        }

        if self.input.date_column.is_empty() || self.input.demand_column.is_empty() {
            anyhow::bail!("date_column and demand_column must not be empty");
        }

        if self.input.date_column == self.input.demand_column {
            anyhow::bail!(
                "date_column and demand_column must differ (both are '{}')",
                self.input.date_column
            );
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!("unknown log level '{}'", self.logging.level);
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            anyhow::bail!("unknown log format '{}'", self.logging.format);
        }

        Ok(())
    }

    /// Parser options derived from the input section
    #[must_use]
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            date_column: self.input.date_column.clone(),
            demand_column: self.input.demand_column.clone(),
            delimiter: self.input.delimiter,
        }
    }

    /// Forecaster for the configured number of periods
    pub fn forecaster(&self) -> Result<TrendForecaster> {
        TrendForecaster::new(self.forecast.periods).context("Invalid forecast configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.forecast.periods, 14);
    }

    #[test]
    fn test_invalid_periods() {
        let mut config = Config::default();
        config.forecast.periods = 0;
        assert!(config.validate().is_err());
        assert!(config.forecaster().is_err());
    }

    #[test]
    fn test_identical_columns_rejected() {
        let mut config = Config::default();
        config.input.demand_column = config.input.date_column.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = String::from("xml");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[forecast]\nperiods = 7\n").unwrap();
        assert_eq!(config.forecast.periods, 7);
        assert_eq!(config.input, InputConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_parser_options_conversion() {
        let mut config = Config::default();
        config.input.delimiter = Delimiter::Auto;
        let options = config.parser_options();
        assert_eq!(options.date_column, "date");
        assert_eq!(options.demand_column, "demand");
        assert_eq!(options.delimiter, Delimiter::Auto);
    }
}
