//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Project metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

fn default_name() -> String {
    "my-styles".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Stylesheet source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    /// Entry stylesheet; its import graph is resolved relative to it
    #[serde(default = "default_entry")]
    pub entry: String,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
        }
    }
}

fn default_entry() -> String {
    "styles/styles.css".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "dist".to_string()
}

/// Browser compatibility targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// Browserslist query controlling syntax lowering and vendor prefixes
    #[serde(default = "default_browsers")]
    pub browsers: String,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            browsers: default_browsers(),
        }
    }
}

fn default_browsers() -> String {
    "last 2 versions".to_string()
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce window for filesystem events, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Glob pattern (relative to the styles directory) for watched files
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            pattern: default_pattern(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_pattern() -> String {
    "**/*.css".to_string()
}
