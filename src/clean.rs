//! Output directory cleanup
//!
//! Runs before the first build of a session so no stale artifacts
//! survive a full rebuild cycle.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

/// Remove the output directory and everything in it.
///
/// Succeeds silently when the directory does not exist. An I/O failure
/// is returned to the caller and aborts the task chain.
pub fn clean_output(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Nothing to clean at {}", dir.display());
        return Ok(());
    }

    eprintln!(
        "{} Cleaning {} for a fresh build",
        "→".blue(),
        dir.display().to_string().cyan()
    );

    fs::remove_dir_all(dir)
        .with_context(|| format!("Failed to remove output directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_missing_dir_is_ok() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");

        assert!(clean_output(&dir).is_ok());
    }

    #[test]
    fn test_clean_removes_tree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("styles.min.css"), "body{}").unwrap();
        fs::write(dir.join("nested/old.css"), "/* stale */").unwrap();

        clean_output(&dir).unwrap();

        assert!(!dir.exists());
    }
}
