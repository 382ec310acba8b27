//! Configuration handling for reorder
//!
//! Configuration is stored in `.reorder/config.toml` (project) and
//! `~/.config/reorder/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Prefix for storage keys (`{prefix}.{collection}`)
    pub key_prefix: String,

    /// Byte limit for the store file, unlimited when unset
    pub quota_bytes: Option<usize>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            key_prefix: "reorder".to_string(),
            quota_bytes: None,
        }
    }
}

impl ProjectConfig {
    /// Storage key holding the current order of a collection
    pub fn storage_key(&self, collection: &str) -> String {
        format!("{}.{}", self.key_prefix, collection)
    }

    /// Storage key holding the defaults a collection resets to
    pub fn defaults_key(&self, collection: &str) -> String {
        format!("{}.{}.defaults", self.key_prefix, collection)
    }

    /// Extracts the collection name from a current-order storage key
    pub fn collection_for_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        let name = key
            .strip_prefix(self.key_prefix.as_str())?
            .strip_prefix('.')?;
        if name.is_empty() || name.ends_with(".defaults") {
            return None;
        }
        Some(name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("key_prefix must not be empty".to_string()));
        }
        if self.quota_bytes == Some(0) {
            return Err(ConfigError::Invalid("quota_bytes must be positive".to_string()));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "reorder", "reorder").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".reorder").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for `.reorder/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".reorder").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}
