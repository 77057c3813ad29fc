//! Clean command implementation

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::clean::clean_output;
use crate::config::Config;

/// Remove the output directory
#[derive(Args, Debug)]
pub struct CleanCommand {}

impl CleanCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        clean_output(&config.output_dir())
    }
}
