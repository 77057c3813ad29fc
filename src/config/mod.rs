//! Configuration handling for Stylepipe
//!
//! Parses and manages stylepipe.toml configuration files.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project metadata
    #[serde(default)]
    pub project: ProjectConfig,

    /// Stylesheet source settings
    #[serde(default)]
    pub styles: StylesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Browser compatibility targets
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path
    ///
    /// A missing config file is not an error: every key has a default, so
    /// a bare project directory builds with the conventional layout.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !canonical_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                canonical_path.display()
            );
            let mut config = Self::default_config();
            config.root = canonical_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            return Ok(config);
        }

        let content = fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse stylepipe.toml")?;

        // Set root directory to the directory containing the config file
        config.root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        config.validate()?;

        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            project: ProjectConfig::default(),
            styles: StylesConfig::default(),
            output: OutputConfig::default(),
            targets: TargetsConfig::default(),
            watch: WatchConfig::default(),
            root: PathBuf::from("."),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.styles.entry.trim().is_empty() {
            anyhow::bail!("styles.entry must not be empty in stylepipe.toml");
        }

        if self.output.dir.trim().is_empty() {
            anyhow::bail!("output.dir must not be empty in stylepipe.toml");
        }

        if self.watch.pattern.trim().is_empty() {
            anyhow::bail!("watch.pattern must not be empty in stylepipe.toml");
        }

        Ok(())
    }

    /// Get the absolute entry stylesheet path
    pub fn entry_path(&self) -> PathBuf {
        self.root.join(&self.styles.entry)
    }

    /// Get the absolute output directory path
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.output.dir)
    }

    /// Directory watched for stylesheet changes: the entry's parent
    pub fn styles_dir(&self) -> PathBuf {
        self.entry_path()
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.root.clone())
    }
}
