//! Configuration for dep12-lint
//!
//! Read from `lint.toml`. Every section and key is optional.
//!
//! ```toml
//! [lint]
//! fatal = true
//! ignore = ["unknown_field"]
//! check_references = true
//!
//! [load]
//! max_document_bytes = 1048576
//! max_depth = 32
//! allow_tags = false
//! ```

use dep12_core::{LoadOptions, WarningKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Complete lint configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Reporting behaviour
    pub lint: LintSettings,
    /// YAML loading limits
    pub load: LoadOptions,
}

/// Reporting behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    /// Treat any remaining warning as a failure
    pub fatal: bool,
    /// Warning kinds dropped from reports
    pub ignore: Vec<WarningKind>,
    /// Run bibliographic checks on `Reference` records
    pub check_references: bool,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            fatal: false,
            ignore: Vec::new(),
            check_references: true,
        }
    }
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// `<config dir>/dep12/lint.toml`, when a config directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dep12").join("lint.toml"))
    }

    /// Configuration from an explicit path, else the default location if
    /// that file exists, else built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load.max_document_bytes == 0 {
            return Err(ConfigError::OutOfRange(
                "max_document_bytes must be positive".to_string(),
            ));
        }
        if self.load.max_depth == 0 {
            return Err(ConfigError::OutOfRange(
                "max_depth must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
