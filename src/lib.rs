//! Stylepipe library
//!
//! Core functionality for the Stylepipe build tool.

pub mod clean;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod utils;
pub mod watch;

pub use cli::Cli;
pub use compiler::StyleCompiler;
pub use config::Config;
