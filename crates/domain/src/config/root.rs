use serde::{Deserialize, Serialize};

use super::blocklist::BlocklistConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use crate::UpdateMode;

const LOCAL_CONFIG_PATH: &str = "dns-blocker.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns-blocker/config.toml";

/// Main configuration structure for the DNS blocker
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Blocklist source, refresh schedule and format
    #[serde(default)]
    pub blocklist: BlocklistConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-blocker.toml in current directory
    /// 3. /etc/dns-blocker/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(uri) = overrides.blocklist_uri {
            self.blocklist.uri = uri;
        }
        if let Some(interval) = overrides.refresh_interval {
            self.blocklist.refresh_interval = interval;
        }
        if let Some(format) = overrides.format {
            self.blocklist.format = format;
        }
        if let Some(mode) = overrides.update_mode {
            self.blocklist.update_mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blocklist.uri.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No blocklist location configured".to_string(),
            ));
        }

        self.blocklist.source()?;
        self.blocklist.format()?;

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub blocklist_uri: Option<String>,
    pub refresh_interval: Option<String>,
    pub format: Option<String>,
    pub update_mode: Option<UpdateMode>,
    pub log_level: Option<String>,
}
