//! The stylesheet compile pipeline
//!
//! Bundles the entry stylesheet with its `@import` graph, lowers modern
//! syntax for the configured browser targets, adds vendor prefixes,
//! strips comments, minifies, and writes the `.min`-suffixed output with
//! a sibling source map. All transformation work is delegated to
//! lightningcss; this module sequences the stages and surfaces errors.

mod sourcemap;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lightningcss::bundler::{Bundler, FileProvider};
use lightningcss::error::Error as CssError;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Error raised by the compile pipeline
#[derive(Debug, Error)]
pub enum CompileError {
    /// Syntax or transform error carrying a source location
    #[error("{filename}:{line}:{column}: {message}")]
    Syntax {
        filename: String,
        line: u32,
        column: u32,
        message: String,
    },

    /// Transform error with no usable location
    #[error("{message}")]
    Transform { message: String },

    /// The browserslist query could not be resolved
    #[error("invalid browser targets {query:?}: {message}")]
    Targets { query: String, message: String },

    /// Source map serialization failed
    #[error("failed to serialize source map: {message}")]
    SourceMap { message: String },

    /// Filesystem failure while writing output
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a lightningcss error into a [`CompileError`], keeping the
/// file/line/column when the toolchain reports one.
fn locate<T: std::fmt::Display>(err: &CssError<T>) -> CompileError {
    match &err.loc {
        Some(loc) => CompileError::Syntax {
            filename: loc.filename.clone(),
            // lightningcss locations are zero-based
            line: loc.line + 1,
            column: loc.column,
            message: err.kind.to_string(),
        },
        None => CompileError::Transform {
            message: err.kind.to_string(),
        },
    }
}

/// Result of a successful compile
#[derive(Debug)]
pub struct BuildArtifact {
    /// Path of the minified stylesheet
    pub stylesheet: PathBuf,

    /// Path of the companion source map
    pub map: PathBuf,

    /// Stylesheet size in bytes
    pub size: usize,

    /// Compile duration
    pub duration: Duration,
}

/// The stylesheet compiler
pub struct StyleCompiler {
    /// Project configuration
    config: Arc<Config>,

    /// Resolved browser targets driving lowering and prefixing
    targets: Targets,
}

impl StyleCompiler {
    /// Create a new compiler, resolving the browserslist query once
    pub fn new(config: Arc<Config>) -> Result<Self, CompileError> {
        let browsers = Browsers::from_browserslist([config.targets.browsers.as_str()])
            .map_err(|e| CompileError::Targets {
                query: config.targets.browsers.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            targets: Targets {
                browsers,
                ..Targets::default()
            },
        })
    }

    /// Run the pipeline once: bundle, lower, minify, write output + map.
    ///
    /// On error nothing is written, so a previous output artifact is
    /// left untouched.
    pub fn compile(&self) -> Result<BuildArtifact, CompileError> {
        let start = Instant::now();
        let entry = self.config.entry_path();
        let out_dir = self.config.output_dir();

        debug!("Bundling {}", entry.display());

        let project_root = self.config.root.to_string_lossy().into_owned();
        let provider = FileProvider::new();

        // The source map tracks original positions from the first stage
        // on, so every later transform maps back to the source files.
        let mut source_map = SourceMap::new(&project_root);

        let mut stylesheet = {
            let mut bundler =
                Bundler::new(&provider, Some(&mut source_map), ParserOptions::default());
            bundler.bundle(&entry).map_err(|e| locate(&e))?
        };

        stylesheet
            .minify(MinifyOptions {
                targets: self.targets.clone(),
                ..MinifyOptions::default()
            })
            .map_err(|e| locate(&e))?;

        // Comments never survive printing; minify collapses the rest.
        let css = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                source_map: Some(&mut source_map),
                targets: self.targets.clone(),
                ..PrinterOptions::default()
            })
            .map_err(|e| locate(&e))?;

        let entry_name = entry
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("styles.css");
        let css_name = min_suffix(entry_name);
        let map_name = format!("{}.map", css_name);

        let code = format!("{}\n/*# sourceMappingURL={} */\n", css.code, map_name);
        let map_json = sourcemap::serialize(&mut source_map)?;

        fs::create_dir_all(&out_dir).map_err(|e| CompileError::Io {
            path: out_dir.clone(),
            source: e,
        })?;

        let css_path = out_dir.join(&css_name);
        let map_path = out_dir.join(&map_name);

        write_atomic(&css_path, code.as_bytes())?;
        write_atomic(&map_path, map_json.as_bytes())?;

        debug!(
            "Wrote {} and {} in {:?}",
            css_path.display(),
            map_path.display(),
            start.elapsed()
        );

        Ok(BuildArtifact {
            stylesheet: css_path,
            map: map_path,
            size: code.len(),
            duration: start.elapsed(),
        })
    }
}

/// Insert the `.min` suffix before the file extension
fn min_suffix(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.min.{}", stem, ext),
        _ => format!("{}.min", file_name),
    }
}

/// Write through a temp file renamed into place, so the destination is
/// never observable half-written.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CompileError> {
    let tmp = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => path.with_file_name(format!("{}.tmp", name)),
        None => path.with_extension("tmp"),
    };

    fs::write(&tmp, bytes).map_err(|e| CompileError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    fs::rename(&tmp, path).map_err(|e| CompileError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_suffix() {
        assert_eq!(min_suffix("styles.css"), "styles.min.css");
        assert_eq!(min_suffix("main.bundle.css"), "main.bundle.min.css");
        assert_eq!(min_suffix("styles"), "styles.min");
        assert_eq!(min_suffix(".hidden"), ".hidden.min");
    }

    #[test]
    fn test_invalid_targets_rejected() {
        let mut config = Config::default_config();
        config.targets.browsers = "definitely not a browser query".to_string();

        let result = StyleCompiler::new(Arc::new(config));
        assert!(matches!(result, Err(CompileError::Targets { .. })));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out.css");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        // No temp file left behind
        assert!(!temp.path().join("out.css.tmp").exists());
    }
}
