//! Kit configuration (dashkit.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log::DEFAULT_LOG_FILE;
use crate::theme::{Theme, ThemeError};
use crate::units::UnitScale;

/// Configuration file name
pub const CONFIG_FILE: &str = "dashkit.toml";

/// Configuration loaded from dashkit.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KitConfig {
    /// Unit scale used by the gutter and scaled-unit helpers
    #[serde(default)]
    pub units: UnitScale,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Logging section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_log_file(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Theme section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme file to load at startup; relative paths resolve against the
    /// directory holding the config file
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Theme error: {0}")]
    ThemeError(#[from] ThemeError),
}

impl KitConfig {
    /// Find dashkit.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: <config dir>/dashkit, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("dashkit").join(CONFIG_FILE)),
            Some(PathBuf::from(CONFIG_FILE)),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from the standard locations, or defaults
    pub fn load() -> Self {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path).unwrap_or_else(|err| {
                crate::log!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        if let (Some(theme), Some(dir)) = (config.theme.path.as_mut(), path.parent()) {
            if theme.is_relative() {
                *theme = dir.join(&*theme);
            }
        }
        Ok(config)
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configured theme, if one is named
    pub fn load_theme(&self) -> Result<Option<Theme>, ConfigError> {
        match &self.theme.path {
            Some(path) => Ok(Some(Theme::load(path)?)),
            None => Ok(None),
        }
    }

    /// Start logging, install the unit scale and load the theme
    pub fn apply(&self) -> Result<Option<Theme>, ConfigError> {
        if self.logging.enabled {
            crate::log::init(&self.logging.file)?;
        }
        UnitScale::install(self.units.clone());
        self.load_theme()
    }
}
