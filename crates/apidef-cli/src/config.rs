//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, which take precedence over both

use crate::cli::DocFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Definition root that namespaces are resolved against
    pub root: Option<PathBuf>,

    /// Default documentation format
    pub format: Option<DocFormat>,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| Error::config(path, e))?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::config(path, e))?
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".apidef.yaml"),
            PathBuf::from(".apidef.json"),
            PathBuf::from("apidef.yaml"),
            PathBuf::from("apidef.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let apidef_dir = config_dir.join("apidef");
            paths.push(apidef_dir.join("config.yaml"));
            paths.push(apidef_dir.join("config.json"));
        }

        paths
    }

    /// Definition root: the flag, else the configured root, else the working directory
    pub fn resolve_root(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Documentation format: the flag, else the configured format, else markdown
    pub fn resolve_format(&self, flag: Option<DocFormat>) -> DocFormat {
        flag.or(self.format).unwrap_or(DocFormat::Markdown)
    }
}
