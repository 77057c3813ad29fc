//! Build command implementation

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::clean::clean_output;
use crate::compiler::StyleCompiler;
use crate::config::Config;
use crate::utils::format_size;

/// Build the stylesheet for production
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Skip cleaning the output directory before building
    #[arg(long)]
    pub no_clean: bool,
}

impl BuildCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading configuration from {}", config_path);
        let config = Arc::new(Config::load(config_path)?);

        if !self.no_clean {
            clean_output(&config.output_dir())?;
        }

        eprintln!("{} Building stylesheet...", "→".blue());

        let compiler = StyleCompiler::new(config)?;
        let artifact = compiler.compile().context("build failed")?;

        let duration = start.elapsed();

        eprintln!(
            "\n{} Built in {:.2}s\n",
            "✓".green().bold(),
            duration.as_secs_f64()
        );
        eprintln!(
            "  {} {} {}",
            "•".dimmed(),
            artifact.stylesheet.display().to_string().cyan(),
            format_size(artifact.size).dimmed()
        );
        eprintln!(
            "  {} {}",
            "•".dimmed(),
            artifact.map.display().to_string().cyan()
        );
        eprintln!();

        Ok(())
    }
}
