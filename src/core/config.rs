//! Configuration management

use crate::core::error::{Error, Result};
use crate::strip::Matcher;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matcher: MatcherConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Identifier the logging methods hang off
    pub namespace: String,
    /// Method names treated as logging calls
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit JSON reports instead of human summaries
    pub json: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            methods: vec![DEFAULT_METHOD.to_string()],
        }
    }
}

impl MatcherConfig {
    /// Build the classifier matcher, rejecting empty names
    pub fn matcher(&self) -> Result<Matcher> {
        if self.namespace.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "matcher.namespace must not be empty".to_string(),
            });
        }
        if self.methods.is_empty() || self.methods.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::ConfigError {
                message: "matcher.methods must list at least one non-empty name".to_string(),
            });
        }
        Ok(Matcher::new(&self.namespace, self.methods.iter()))
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        // Surface bad matcher settings at load time, not on first use
        config.matcher.matcher()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::unlog_home()?.join("config.toml"))
    }

    /// Get the unlog home directory
    pub fn unlog_home() -> Result<PathBuf> {
        // Check UNLOG_HOME env var first
        if let Ok(home) = std::env::var("UNLOG_HOME") {
            return Ok(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "unlog", "unlog")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine unlog home directory".to_string(),
            })
    }
}

pub const DEFAULT_NAMESPACE: &str = "console";
pub const DEFAULT_METHOD: &str = "log";
