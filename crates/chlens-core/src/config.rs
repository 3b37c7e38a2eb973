//! Configuration file model
//!
//! chlens reads an optional TOML file from `<config_dir>/chlens/config.toml`.
//! Every key has a default, so an empty or missing file yields the stock
//! behaviour.
//!
//! ```toml
//! [explain]
//! payload_field = "explain"
//! default_indent_width = 2
//! empty_result_label = "Empty Result"
//!
//! [logging]
//! filter = "info"
//! json = false
//! ```

use crate::error::{ChlensError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChlensConfig {
    pub explain: ExplainSettings,
    pub logging: LoggingSettings,
}

/// Settings consumed by the plan parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainSettings {
    /// Column whose presence in the first row marks a plan payload
    pub payload_field: String,
    /// Indentation width assumed when no plan line is indented
    pub default_indent_width: usize,
    /// Root name used when the server returned no rows
    pub empty_result_label: String,
}

impl Default for ExplainSettings {
    fn default() -> Self {
        Self {
            payload_field: "explain".to_string(),
            default_indent_width: 2,
            empty_result_label: "Empty Result".to_string(),
        }
    }
}

/// Settings for the binary's log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl ChlensConfig {
    /// Parses configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading configuration");
        Self::from_toml(&text)
    }

    /// Reads the default configuration file, falling back to defaults when it
    /// does not exist
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.explain.payload_field.trim().is_empty() {
            return Err(ChlensError::Configuration(
                "explain.payload_field must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Location of the default configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("chlens").join("config.toml"))
}
