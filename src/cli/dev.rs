//! Dev command implementation
//!
//! The default task chain: clean the output directory, run one build,
//! then watch the stylesheet sources and rebuild on every change. Each
//! step completes before the next begins, so the initial build is never
//! raced by a watch-triggered rebuild.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::clean::clean_output;
use crate::compiler::{CompileError, StyleCompiler};
use crate::config::Config;
use crate::watch::Watcher;

/// Clean, build once, then watch sources and rebuild on change
#[derive(Args, Debug, Default)]
pub struct DevCommand {}

impl DevCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Arc::new(Config::load(config_path)?);

        clean_output(&config.output_dir())?;

        let compiler = StyleCompiler::new(config.clone())?;

        // Initial build. A syntax error is reported but does not stop the
        // chain; the watcher still starts and serves the next rebuild.
        match compiler.compile() {
            Ok(artifact) => {
                eprintln!(
                    "{} Built {}",
                    "✓".green(),
                    artifact.stylesheet.display().to_string().cyan()
                );
            }
            Err(err @ CompileError::Io { .. }) => {
                return Err(err).context("initial build failed");
            }
            Err(err) => {
                eprintln!("{} {}", "✗".red(), err);
            }
        }

        let watcher = Watcher::new(config, compiler);
        watcher.watch().context("watch mode failed")
    }
}
