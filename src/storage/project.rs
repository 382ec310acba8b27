//! Project management
//!
//! Handles project initialization and provides access to the store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, FileStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a reorder project. Run 'reorder init' first.")]
    NotInProject,
}

/// A reorder project
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let reorder_dir = root.join(".reorder");

        if !reorder_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let reorder_dir = root.join(".reorder");

        fs::create_dir_all(&reorder_dir).with_context(|| {
            format!("Failed to create .reorder directory: {}", reorder_dir.display())
        })?;

        // Create default config
        let config_path = reorder_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# reorder configuration

# Storage keys are "{key_prefix}.{collection}"
key_prefix = "reorder"

# Byte limit for .reorder/store.json (unset means unlimited)
# quota_bytes = 5242880
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Create .gitignore for .reorder
        let gitignore_path = reorder_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore write scratch files
*.tmp
*.lock
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .reorder directory path
    pub fn reorder_dir(&self) -> PathBuf {
        self.root.join(".reorder")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the key-value store, honoring the configured quota
    pub fn store(&self) -> FileStore {
        FileStore::for_project(&self.root).with_quota(self.config.project.quota_bytes)
    }
}
