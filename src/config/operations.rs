//! Config loading, validation, and resolution.

use super::model::Config;
use crate::error::{PromptError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PROMPTWEAVE_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = ".promptweave.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            PromptError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `default_platform` must be non-empty
    /// - `history_file`, when set, must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.default_platform.trim().is_empty() {
            return Err(PromptError::UserError(
                "config validation failed: default_platform must not be empty".to_string(),
            ));
        }

        if let Some(history) = &self.history_file
            && history.trim().is_empty()
        {
            return Err(PromptError::UserError(
                "config validation failed: history_file must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve which config file to use.
    ///
    /// Order: explicit path, then `$PROMPTWEAVE_CONFIG`, then
    /// `.promptweave.yaml` in the current directory if it exists.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
            && !env_path.is_empty()
        {
            return Some(PathBuf::from(env_path));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Load the resolved config file, or defaults when there is none.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
