//! Configuration management for pos-energy
//!
//! This module handles loading, validation, and management of the service
//! configuration from YAML files, with an environment variable to point at a
//! specific file. Every section has defaults, so a partial file (or no file
//! at all) yields a working configuration.

use crate::error::{EnergyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "POS_ENERGY_CONFIG";

/// Bitcoin proof-of-work power estimate (CBECI, 0.05 USD/kWh electricity cost)
pub const DEFAULT_BITCOIN_URL: &str =
    "https://ccaf.io/cbeci/api/charts/energy_efficiency_of_mining_hardware/actual/0.05";

/// Ethereum proof-of-stake power estimate (CBNSI)
pub const DEFAULT_ETHEREUM_URL: &str = "https://ccaf.io/cbeci/api/eth/pos/data/stats";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Upstream statistics feeds
    pub sources: SourcesConfig,

    /// Refresh scheduling
    pub refresh: RefreshConfig,

    /// Presentation tweaks applied to derived metrics
    pub display: DisplayConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Web server binding configuration
    pub web: WebConfig,
}

/// Upstream feed endpoints and HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Bitcoin statistics endpoint
    pub bitcoin_url: String,

    /// Ethereum statistics endpoint
    pub ethereum_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Refresh timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between refreshes
    pub interval_secs: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Floor for the Ethereum share in the adjusted percentages
    pub min_ethereum_percentage: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Path to log file; its parent directory receives the daily files
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address
    pub host: String,

    /// TCP port
    pub port: u16,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            bitcoin_url: DEFAULT_BITCOIN_URL.to_string(),
            ethereum_url: DEFAULT_ETHEREUM_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_ethereum_percentage: crate::metrics::DEFAULT_MIN_ETHEREUM_PERCENTAGE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: "/tmp/pos-energy.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8089,
        }
    }
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the first location that exists
    ///
    /// `POS_ENERGY_CONFIG` wins when set; a missing file at that path is an
    /// error rather than a silent fallback.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            let path = Path::new(&path);
            if !path.exists() {
                return Err(EnergyError::config(format!(
                    "{} points to missing file {}",
                    CONFIG_PATH_ENV,
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let default_paths = ["pos_energy.yaml", "/etc/pos-energy/config.yaml"];
        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sources.bitcoin_url.trim().is_empty() {
            return Err(EnergyError::validation(
                "sources.bitcoin_url",
                "URL cannot be empty",
            ));
        }

        if self.sources.ethereum_url.trim().is_empty() {
            return Err(EnergyError::validation(
                "sources.ethereum_url",
                "URL cannot be empty",
            ));
        }

        if self.sources.request_timeout_secs == 0 {
            return Err(EnergyError::validation(
                "sources.request_timeout_secs",
                "Must be greater than 0",
            ));
        }

        if self.refresh.interval_secs == 0 {
            return Err(EnergyError::validation(
                "refresh.interval_secs",
                "Must be greater than 0",
            ));
        }

        let floor = self.display.min_ethereum_percentage;
        if !floor.is_finite() || !(0.0..=100.0).contains(&floor) {
            return Err(EnergyError::validation(
                "display.min_ethereum_percentage",
                "Must be between 0 and 100",
            ));
        }

        if self.web.port == 0 {
            return Err(EnergyError::validation(
                "web.port",
                "Port must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.bitcoin_url, DEFAULT_BITCOIN_URL);
        assert_eq!(config.sources.ethereum_url, DEFAULT_ETHEREUM_URL);
        assert_eq!(config.refresh.interval(), Duration::from_secs(5 * 60));
        assert_eq!(config.display.min_ethereum_percentage, 2.0);
        assert_eq!(config.web.port, 8089);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.sources.bitcoin_url = "  ".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.refresh.interval_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.display.min_ethereum_percentage = 101.0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.display.min_ethereum_percentage = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("refresh:\n  interval_secs: 60\n").unwrap();
        assert_eq!(config.refresh.interval_secs, 60);
        assert_eq!(config.sources.request_timeout_secs, 10);
        assert_eq!(config.logging.level, "INFO");
    }
}
