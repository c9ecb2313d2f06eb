use serde::{Deserialize, Serialize};

use super::chnroute::ChnRouteConfig;
use super::errors::ConfigError;
use super::inspect::InspectConfig;
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "chnroute-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/chnroute-dns/config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for chnroute-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Domestic route lists
    #[serde(default)]
    pub chnroute: ChnRouteConfig,

    /// Packet inspection behaviour
    #[serde(default)]
    pub inspect: InspectConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. chnroute-dns.toml in current directory
    /// 3. /etc/chnroute-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(path) = overrides.chnroute_file {
            self.chnroute.ipv4_file = Some(path);
        }
        if let Some(path) = overrides.chnroute6_file {
            self.chnroute.ipv6_file = Some(path);
        }
        if overrides.noip_as_chnip {
            self.inspect.noip_as_chnip = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        for path in [&self.chnroute.ipv4_file, &self.chnroute.ipv6_file]
            .into_iter()
            .flatten()
        {
            if path.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "chnroute file path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub chnroute_file: Option<String>,
    pub chnroute6_file: Option<String>,
    pub noip_as_chnip: bool,
}
