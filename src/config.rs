//! Tool configuration.
//!
//! Settings load from an optional `adsmith.toml`. Every field has a default,
//! so the file is sparse — override only what you need:
//!
//! ```toml
//! storage_dir = "campaigns"   # Where campaign records are kept
//! output_dir = "outputs"      # Where rendered creatives land
//!
//! [copy]
//! model = "gpt-4-turbo-preview"  # Chat-completions model for copywriting
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `adsmith.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding one JSON record per campaign.
    pub storage_dir: PathBuf,
    /// Directory the rendered variants are written under.
    pub output_dir: PathBuf,
    pub copy: CopyConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("campaigns"),
            output_dir: PathBuf::from("outputs"),
            copy: CopyConfig::default(),
        }
    }
}

/// Copywriting provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    /// Chat-completions model name. When absent, the provider's default is used.
    pub model: Option<String>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("storage_dir must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output_dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Load settings from `path`, falling back to defaults when no file exists.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}
