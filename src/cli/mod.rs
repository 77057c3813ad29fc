//! Command-line interface for Stylepipe
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `dev`: clean, build, then watch for changes (the default)
//! - `build`: one-shot production build
//! - `clean`: remove the output directory
//! - `init`: project scaffolding

mod build;
mod clean;
mod dev;
mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use build::BuildCommand;
pub use clean::CleanCommand;
pub use dev::DevCommand;
pub use init::InitCommand;

/// Stylepipe - a batteries-included stylesheet build pipeline
#[derive(Parser, Debug)]
#[command(name = "stylepipe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to stylepipe.toml config file
    #[arg(short, long, global = true, default_value = "stylepipe.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean, build once, then watch sources and rebuild on change
    Dev(DevCommand),

    /// Build the stylesheet for production
    Build(BuildCommand),

    /// Remove the output directory
    Clean(CleanCommand),

    /// Initialize a new project
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    ///
    /// Running the binary with no subcommand is equivalent to `dev`.
    pub fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Some(Commands::Dev(cmd)) => cmd.execute(&self.config),
            Some(Commands::Build(cmd)) => cmd.execute(&self.config),
            Some(Commands::Clean(cmd)) => cmd.execute(&self.config),
            Some(Commands::Init(cmd)) => cmd.execute(),
            None => DevCommand::default().execute(&self.config),
        }
    }
}

/// Print the Stylepipe banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "✦".cyan(),
        "Stylepipe".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
