//! Host configuration loaded from TOML.
//!
//! ```toml
//! [search]
//! default_limit = 3
//! max_limit = 50
//! source_timeout_ms = 8000
//!
//! [plugins]
//! enabled = ["docs"]
//! ```

use std::path::{Path, PathBuf};

use knowflow_search::AggregatorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{KnowflowError, Result};

/// Search behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Limit used when a tool call omits `limit`.
    pub default_limit: usize,
    /// Largest `limit` a tool call may ask for.
    pub max_limit: usize,
    /// How long one source may take before it is dropped from a query.
    pub source_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let core = AggregatorConfig::default();
        Self {
            default_limit: core.default_limit,
            max_limit: core.max_limit,
            source_timeout_ms: core.source_timeout_ms,
        }
    }
}

impl SearchSettings {
    /// Convert into the core crate's configuration.
    pub fn to_aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
            source_timeout_ms: self.source_timeout_ms,
        }
    }
}

/// Which built-in plugins discovery should register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugin names, registered in this order.
    pub enabled: Vec<String>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            enabled: vec!["docs".to_string()],
        }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowflowConfig {
    /// Search behaviour.
    pub search: SearchSettings,
    /// Plugin selection.
    pub plugins: PluginSettings,
}

impl KnowflowConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| KnowflowError::Config(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KnowflowError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`KnowflowError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search
            .to_aggregator_config()
            .validate()
            .map_err(|e| KnowflowError::Config(e.to_string()))
    }

    /// Returns the config file path.
    ///
    /// `KNOWFLOW_CONFIG` wins if set; otherwise `~/.config/knowflow/config.toml`
    /// (respecting `XDG_CONFIG_HOME`).
    pub fn default_config_path() -> PathBuf {
        if let Some(explicit) = std::env::var_os("KNOWFLOW_CONFIG") {
            PathBuf::from(explicit)
        } else if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("knowflow").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("knowflow")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/knowflow-config/config.toml")
        }
    }
}
