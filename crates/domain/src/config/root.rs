use serde::{Deserialize, Serialize};

use crate::ede_text::parse_ede_text;

use super::blocklist::BlocklistConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

/// Main configuration structure for a blocklist node
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Blocklist router configuration
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
    /// 2. blockgate.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("blockgate.toml").exists() {
            Self::from_file("blockgate.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(id) = overrides.id {
            self.blocklist.id = id;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blocklist.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Blocklist id cannot be empty".to_string(),
            ));
        }

        if let Some(ede) = &self.blocklist.extended_error {
            parse_ede_text(&ede.extra_text).map_err(|e| {
                ConfigError::Validation(format!("Extended error text: {}", e))
            })?;
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub id: Option<String>,
    pub log_level: Option<String>,
}
