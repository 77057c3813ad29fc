//! End-to-end tests for the compile pipeline

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use stylepipe::compiler::{CompileError, StyleCompiler};
use stylepipe::config::Config;

/// Lay out a project with an entry stylesheet and optional partials,
/// returning a config rooted at the temp directory.
fn project(entry_css: &str, partials: &[(&str, &str)]) -> (TempDir, Arc<Config>) {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    fs::create_dir_all(&styles).unwrap();
    fs::write(styles.join("styles.css"), entry_css).unwrap();
    for (name, content) in partials {
        fs::write(styles.join(name), content).unwrap();
    }

    let mut config = Config::default_config();
    config.root = temp.path().to_path_buf();
    (temp, Arc::new(config))
}

const ENTRY: &str = r#"/* build-time comment: remove me */
@import "base.css";

.card {
  margin: 0 auto;
  color: red;
}
"#;

const BASE: &str = r#"body {
  margin: 0;
}
"#;

#[test]
fn test_build_produces_artifact_pair() {
    let (temp, config) = project(ENTRY, &[("base.css", BASE)]);
    let compiler = StyleCompiler::new(config).unwrap();

    let artifact = compiler.compile().unwrap();

    assert_eq!(artifact.stylesheet, temp.path().join("dist/styles.min.css"));
    assert_eq!(artifact.map, temp.path().join("dist/styles.min.css.map"));

    let css = fs::read_to_string(&artifact.stylesheet).unwrap();
    let map = fs::read_to_string(&artifact.map).unwrap();
    assert!(!css.is_empty());
    assert!(!map.is_empty());
}

#[test]
fn test_output_is_bundled_minified_and_comment_free() {
    let (_temp, config) = project(ENTRY, &[("base.css", BASE)]);
    let compiler = StyleCompiler::new(config).unwrap();

    let artifact = compiler.compile().unwrap();
    let css = fs::read_to_string(&artifact.stylesheet).unwrap();

    // Imports are inlined into one file
    assert!(!css.contains("@import"));
    assert!(css.contains("margin:0 auto"));
    assert!(css.contains("color:red"));

    // Comments are stripped; the only remaining marker is the trailing
    // source map reference
    assert!(!css.contains("remove me"));
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(!lines[0].contains("/*"));
    assert!(lines[1].starts_with("/*# sourceMappingURL=styles.min.css.map"));
}

#[test]
fn test_source_map_references_original_sources() {
    let (_temp, config) = project(ENTRY, &[("base.css", BASE)]);
    let compiler = StyleCompiler::new(config).unwrap();

    let artifact = compiler.compile().unwrap();
    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&artifact.map).unwrap()).unwrap();

    assert_eq!(map["version"], 3);
    assert!(!map["mappings"].as_str().unwrap().is_empty());

    let sources: Vec<String> = map["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    assert!(sources.iter().any(|s| s.ends_with("styles.css")));
    assert!(sources.iter().any(|s| s.ends_with("base.css")));
}

#[test]
fn test_rebuild_is_idempotent() {
    let (_temp, config) = project(ENTRY, &[("base.css", BASE)]);
    let compiler = StyleCompiler::new(config).unwrap();

    let first = compiler.compile().unwrap();
    let css_first = fs::read(&first.stylesheet).unwrap();
    let map_first = fs::read(&first.map).unwrap();

    let second = compiler.compile().unwrap();
    let css_second = fs::read(&second.stylesheet).unwrap();
    let map_second = fs::read(&second.map).unwrap();

    assert_eq!(css_first, css_second);
    assert_eq!(map_first, map_second);
}

#[test]
fn test_syntax_error_leaves_previous_output_untouched() {
    let (temp, config) = project(ENTRY, &[("base.css", BASE)]);
    let compiler = StyleCompiler::new(config).unwrap();

    let artifact = compiler.compile().unwrap();
    let good_css = fs::read(&artifact.stylesheet).unwrap();

    // Break the entry and rebuild
    fs::write(
        temp.path().join("styles/styles.css"),
        "..broken { color: red; }",
    )
    .unwrap();

    let err = compiler.compile().unwrap_err();
    assert!(matches!(err, CompileError::Syntax { .. }));
    assert!(err.to_string().contains("styles.css"));

    // The previous artifact survives a failed cycle
    assert_eq!(fs::read(&artifact.stylesheet).unwrap(), good_css);
}

#[test]
fn test_vendor_prefixes_for_configured_targets() {
    let input = r#".button {
  user-select: none;

  &:hover {
    color: blue;
  }
}
"#;
    let (_temp, config) = {
        let (temp, config) = project(input, &[]);
        let mut config = (*config).clone();
        config.targets.browsers = "safari 12".to_string();
        (temp, Arc::new(config))
    };

    let compiler = StyleCompiler::new(config).unwrap();
    let artifact = compiler.compile().unwrap();
    let css = fs::read_to_string(&artifact.stylesheet).unwrap();

    // Safari 12 needs the -webkit prefix, and nesting is compiled away
    assert!(css.contains("-webkit-user-select"));
    assert!(css.contains(".button:hover"));
}

#[test]
fn test_missing_entry_fails() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default_config();
    config.root = temp.path().to_path_buf();

    let compiler = StyleCompiler::new(Arc::new(config)).unwrap();
    assert!(compiler.compile().is_err());
}

#[test]
fn test_output_name_follows_entry_name() {
    let (temp, config) = {
        let (temp, config) = project(ENTRY, &[("base.css", BASE)]);
        let mut config = (*config).clone();
        config.styles.entry = "styles/main.css".to_string();
        (temp, Arc::new(config))
    };
    fs::rename(
        temp.path().join("styles/styles.css"),
        temp.path().join("styles/main.css"),
    )
    .unwrap();

    let compiler = StyleCompiler::new(config).unwrap();
    let artifact = compiler.compile().unwrap();

    assert_eq!(artifact.stylesheet, temp.path().join("dist/main.min.css"));
    assert_eq!(artifact.map, temp.path().join("dist/main.min.css.map"));
}
