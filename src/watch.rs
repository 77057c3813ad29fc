//! Watch mode for automatic rebuilds on file changes
//!
//! Observes the stylesheet source tree through a debounced watcher and
//! re-runs the compile pipeline for every relevant change. Rebuilds are
//! serialized: the event loop runs one compile to completion before
//! receiving the next batch, so the output is never written to by two
//! builds at once.

use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use globset::{Glob, GlobMatcher};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use thiserror::Error;
use tracing::error;
use walkdir::WalkDir;

use crate::compiler::{BuildArtifact, CompileError, StyleCompiler};
use crate::config::Config;
use crate::utils::{format_duration, relative_path};

/// Error during watch mode
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize the file watcher
    #[error("failed to initialize file watcher: {0}")]
    Init(#[source] notify::Error),

    /// Failed to register the watch path
    #[error("failed to watch path: {0}")]
    Path(#[source] notify::Error),

    /// The configured watch glob is malformed
    #[error("invalid watch pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// The event channel closed unexpectedly
    #[error("watch channel closed: {0}")]
    Channel(String),

    /// The styles directory does not exist
    #[error("styles directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A rebuild failed in a way that is not recoverable
    #[error(transparent)]
    Fatal(#[from] CompileError),
}

/// File watcher driving serialized rebuilds
pub struct Watcher {
    /// Project configuration
    config: Arc<Config>,

    /// Compiler invoked for every rebuild
    compiler: StyleCompiler,
}

impl Watcher {
    pub fn new(config: Arc<Config>, compiler: StyleCompiler) -> Self {
        Self { config, compiler }
    }

    /// Register the observation and run the rebuild loop.
    ///
    /// Blocks until the process is terminated externally or the watch
    /// channel fails. Registration failures are fatal at startup.
    pub fn watch(&self) -> Result<(), WatchError> {
        let styles_dir = self.config.styles_dir();
        if !styles_dir.exists() {
            return Err(WatchError::SourceNotFound(styles_dir));
        }

        let matcher = Glob::new(&self.config.watch.pattern)?.compile_matcher();

        let (tx, rx) = channel();
        let mut debouncer = new_debouncer(
            Duration::from_millis(self.config.watch.debounce_ms),
            tx,
        )
        .map_err(WatchError::Init)?;

        debouncer
            .watcher()
            .watch(&styles_dir, RecursiveMode::Recursive)
            .map_err(WatchError::Path)?;

        let watched = count_sources(&styles_dir, &matcher);
        eprintln!(
            "{} Watching {} stylesheet file(s) in {} for changes...",
            "→".blue(),
            watched,
            styles_dir.display().to_string().cyan()
        );

        // Events received while a build runs queue in the channel and are
        // handled on the next iteration, one rebuild at a time.
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    let changed: Vec<_> = events
                        .iter()
                        .filter(|e| {
                            matches!(e.kind, DebouncedEventKind::Any)
                                && is_relevant(&e.path, &styles_dir, &matcher)
                        })
                        .collect();

                    if changed.is_empty() {
                        continue;
                    }

                    for event in &changed {
                        eprintln!(
                            "  {} Changed: {}",
                            "↻".yellow(),
                            display_path(&event.path, &self.config.root).dimmed()
                        );
                    }

                    self.rebuild()?;
                }
                Ok(Err(e)) => {
                    // Watch error, keep observing
                    error!("Watch error: {}", e);
                }
                Err(e) => return Err(WatchError::Channel(e.to_string())),
            }
        }
    }

    /// Run one rebuild to completion.
    ///
    /// A syntax error is reported and watching continues; a filesystem
    /// error while writing output is fatal.
    fn rebuild(&self) -> Result<(), WatchError> {
        match self.compiler.compile() {
            Ok(artifact) => {
                report_success(&artifact);
                Ok(())
            }
            Err(err @ CompileError::Io { .. }) => Err(WatchError::Fatal(err)),
            Err(err) => {
                eprintln!("  {} {}", "✗".red(), err);
                Ok(())
            }
        }
    }
}

fn report_success(artifact: &BuildArtifact) {
    eprintln!(
        "  {} Rebuilt {} in {}",
        "✓".green(),
        artifact.stylesheet.display().to_string().cyan(),
        format_duration(artifact.duration).dimmed()
    );
}

/// Check whether a changed path matters for rebuilding
fn is_relevant(path: &Path, styles_dir: &Path, matcher: &GlobMatcher) -> bool {
    path.strip_prefix(styles_dir)
        .map(|rel| matcher.is_match(rel))
        .unwrap_or(false)
}

/// Display a path relative to the project root when possible
fn display_path(path: &Path, root: &Path) -> String {
    relative_path(root, path).unwrap_or_else(|| path.display().to_string())
}

/// Count the currently-watched stylesheet files, for the status line
fn count_sources(styles_dir: &Path, matcher: &GlobMatcher) -> usize {
    WalkDir::new(styles_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_relevant(e.path(), styles_dir, matcher))
        .count()
}
