//! Dashboard configuration
//!
//! Settings are read from a TOML file in the platform config directory
//! (`~/.config/ziamet/config.toml` on Linux) or from an explicit path. A
//! missing default file is not an error; every key has a default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::provider::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::data::{LivePolicy, StationClient};

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration
///
/// Example TOML:
/// ```toml
/// endpoint = "https://weatherstations.nmsu.edu/api/weatherstations"
/// live_data = "discard"
/// request_timeout_secs = 10
/// auto_refresh_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Station collection endpoint
    pub endpoint: String,
    /// What to do with a successful API response
    pub live_data: LivePolicy,
    /// HTTP timeout for the station request
    pub request_timeout_secs: u64,
    /// Refresh automatically at this interval when set
    pub auto_refresh_secs: Option<u64>,
    /// Log file path; defaults to `ziamet.log` in the cache directory
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            live_data: LivePolicy::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_refresh_secs: None,
            log_file: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "nmsu", "ziamet")
}

impl Config {
    /// Path of the default config file, if a home directory is available
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Default log file location, if a home directory is available
    pub fn default_log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.cache_dir().join("ziamet.log"))
    }

    /// Loads configuration from `path`, or from the default location when
    /// `path` is `None`
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and parses a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// HTTP timeout; zero falls back to the default
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Auto-refresh interval; zero counts as disabled
    pub fn auto_refresh_interval(&self) -> Option<Duration> {
        self.auto_refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Resolved log file path
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(Self::default_log_path)
    }

    /// Builds the station client described by this configuration
    pub fn station_client(&self) -> StationClient {
        StationClient::new()
            .with_endpoint(self.endpoint.clone())
            .with_policy(self.live_data)
            .with_timeout(self.request_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        (temp_dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.live_data, LivePolicy::Discard);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.auto_refresh_interval().is_none());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
endpoint = "http://localhost:8080/stations"
live_data = "use"
request_timeout_secs = 3
auto_refresh_secs = 120
log_file = "/tmp/ziamet-test.log"
"#,
        );

        let config = Config::load(Some(&path)).expect("config should load");
        assert_eq!(config.endpoint, "http://localhost:8080/stations");
        assert_eq!(config.live_data, LivePolicy::Use);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.auto_refresh_interval(), Some(Duration::from_secs(120)));
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/ziamet-test.log")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let (_dir, path) = write_config("live_data = \"use\"\n");

        let config = Config::load_from(&path).expect("config should load");
        assert_eq!(config.live_data, LivePolicy::Use);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_auto_refresh_is_disabled() {
        let config = Config {
            auto_refresh_secs: Some(0),
            ..Default::default()
        };
        assert!(config.auto_refresh_interval().is_none());
    }

    #[test]
    fn test_zero_request_timeout_uses_default() {
        let (_dir, path) = write_config("request_timeout_secs = 0\n");

        let config = Config::load_from(&path).expect("config should load");
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_policy_aliases_match_cli() {
        let (_dir, path) = write_config("live_data = \"live\"\n");
        let config = Config::load_from(&path).expect("config should load");
        assert_eq!(config.live_data, LivePolicy::Use);

        let (_dir, path) = write_config("live_data = \"demo\"\n");
        let config = Config::load_from(&path).expect("config should load");
        assert_eq!(config.live_data, LivePolicy::Discard);
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nope.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_invalid_policy_is_parse_error() {
        let (_dir, path) = write_config("live_data = \"sometimes\"\n");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_station_client_from_config() {
        let config = Config {
            endpoint: "http://localhost:9/stations".to_string(),
            live_data: LivePolicy::Use,
            ..Default::default()
        };

        let client = config.station_client();
        assert_eq!(client.endpoint(), "http://localhost:9/stations");
        assert_eq!(client.policy(), LivePolicy::Use);
    }
}
