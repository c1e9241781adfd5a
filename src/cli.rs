//! Command-line interface parsing for the ZiaMet dashboard
//!
//! Handles the clap argument definitions and turns them into a
//! [`StartupConfig`] plus overrides on top of the file configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::Level;

use crate::config::Config;
use crate::data::{LivePolicy, MeasurementType};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The measurement name is not recognized
    #[error("Invalid measurement: '{0}'. Valid measurements: temp, wind")]
    InvalidMeasurement(String),

    /// The live-data policy is not recognized
    #[error("Invalid live data policy: '{0}'. Valid policies: discard, use")]
    InvalidLivePolicy(String),
}

/// ZiaMet - NMSU weather station network dashboard
#[derive(Parser, Debug)]
#[command(name = "ziamet")]
#[command(about = "NMSU ZiaMet weather station dashboard")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Station API endpoint (overrides config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// What to do with a successful API response: discard or use
    #[arg(long, value_name = "POLICY")]
    pub live_data: Option<String>,

    /// Refresh automatically every N seconds (overrides config file)
    #[arg(long, value_name = "SECS")]
    pub auto_refresh: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,

    /// Start with the station list filtered by this term
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Start with the trend chart showing this measurement: temp or wind
    #[arg(long, value_name = "MEASUREMENT")]
    pub measurement: Option<String>,
}

/// Settings derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupConfig {
    /// Initial search term
    pub search_term: Option<String>,
    /// Initial measurement type for the trend chart
    pub measurement: Option<MeasurementType>,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Live-data policy override
    pub live_data: Option<LivePolicy>,
    /// Auto-refresh override
    pub auto_refresh_secs: Option<u64>,
}

/// Parses a measurement argument into a MeasurementType
pub fn parse_measurement_arg(s: &str) -> Result<MeasurementType, CliError> {
    MeasurementType::from_str(s).ok_or_else(|| CliError::InvalidMeasurement(s.to_string()))
}

/// Parses a live-data policy argument
pub fn parse_live_policy_arg(s: &str) -> Result<LivePolicy, CliError> {
    LivePolicy::from_str(s).ok_or_else(|| CliError::InvalidLivePolicy(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the requested settings
    /// * `Err(CliError)` if a measurement or policy name is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let measurement = cli
            .measurement
            .as_deref()
            .map(parse_measurement_arg)
            .transpose()?;
        let live_data = cli
            .live_data
            .as_deref()
            .map(parse_live_policy_arg)
            .transpose()?;

        Ok(StartupConfig {
            search_term: cli.search.clone(),
            measurement,
            endpoint: cli.endpoint.clone(),
            live_data,
            auto_refresh_secs: cli.auto_refresh,
        })
    }

    /// Applies CLI overrides on top of the file configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(policy) = self.live_data {
            config.live_data = policy;
        }
        if let Some(secs) = self.auto_refresh_secs {
            config.auto_refresh_secs = Some(secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurement_arg_aliases() {
        assert_eq!(
            parse_measurement_arg("temp").unwrap(),
            MeasurementType::Temperature
        );
        assert_eq!(
            parse_measurement_arg("wind").unwrap(),
            MeasurementType::WindSpeed
        );
        assert_eq!(
            parse_measurement_arg("Wind Speed").unwrap(),
            MeasurementType::WindSpeed
        );
    }

    #[test]
    fn test_parse_measurement_arg_invalid() {
        let err = parse_measurement_arg("pressure").unwrap_err();
        assert!(err.to_string().contains("Invalid measurement"));
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn test_parse_live_policy_arg() {
        assert_eq!(parse_live_policy_arg("use").unwrap(), LivePolicy::Use);
        assert_eq!(parse_live_policy_arg("discard").unwrap(), LivePolicy::Discard);
        assert!(parse_live_policy_arg("maybe").is_err());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["ziamet"]);
        assert!(cli.config.is_none());
        assert!(cli.search.is_none());
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "ziamet",
            "--config",
            "/tmp/ziamet.toml",
            "--endpoint",
            "http://localhost:8080/stations",
            "--live-data",
            "use",
            "--auto-refresh",
            "60",
            "--log-level",
            "debug",
            "--search",
            "las cruces",
            "--measurement",
            "wind",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ziamet.toml")));
        assert_eq!(cli.log_level, Level::DEBUG);
        assert_eq!(cli.auto_refresh, Some(60));

        let startup = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(startup.search_term.as_deref(), Some("las cruces"));
        assert_eq!(startup.measurement, Some(MeasurementType::WindSpeed));
        assert_eq!(startup.live_data, Some(LivePolicy::Use));
    }

    #[test]
    fn test_startup_config_default() {
        let cli = Cli::parse_from(["ziamet"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(startup, StartupConfig::default());
    }

    #[test]
    fn test_startup_config_invalid_measurement() {
        let cli = Cli::parse_from(["ziamet", "--measurement", "rain"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let cli = Cli::parse_from([
            "ziamet",
            "--endpoint",
            "http://localhost:1/x",
            "--live-data",
            "use",
            "--auto-refresh",
            "30",
        ]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        let mut config = Config::default();
        startup.apply_to(&mut config);

        assert_eq!(config.endpoint, "http://localhost:1/x");
        assert_eq!(config.live_data, LivePolicy::Use);
        assert_eq!(config.auto_refresh_secs, Some(30));
    }

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let startup = StartupConfig::default();
        let mut config = Config::default();
        startup.apply_to(&mut config);
        assert_eq!(config, Config::default());
    }
}
