//! Project initialization command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Initialize a new project
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Project name / directory
    #[arg(default_value = ".")]
    pub name: String,
}

impl InitCommand {
    pub fn execute(&self) -> Result<()> {
        let project_dir = Path::new(&self.name);

        eprintln!("{} Initializing new project...\n", "→".blue());

        if self.name != "." {
            fs::create_dir_all(project_dir)
                .context("Failed to create project directory")?;
        }

        let config_content = self.generate_config();
        fs::write(project_dir.join("stylepipe.toml"), config_content)
            .context("Failed to write stylepipe.toml")?;
        eprintln!("  {} Created {}", "✓".green(), "stylepipe.toml".cyan());

        let styles_dir = project_dir.join("styles");
        fs::create_dir_all(&styles_dir)
            .context("Failed to create styles directory")?;

        fs::write(styles_dir.join("styles.css"), ENTRY_TEMPLATE)
            .context("Failed to write styles/styles.css")?;
        eprintln!("  {} Created {}", "✓".green(), "styles/styles.css".cyan());

        fs::write(styles_dir.join("base.css"), BASE_TEMPLATE)
            .context("Failed to write styles/base.css")?;
        eprintln!("  {} Created {}", "✓".green(), "styles/base.css".cyan());

        eprintln!(
            "\n{} Project initialized successfully!\n",
            "✓".green().bold()
        );

        eprintln!("  Next steps:");
        if self.name != "." {
            eprintln!("    {} cd {}", "→".dimmed(), self.name.cyan());
        }
        eprintln!("    {} stylepipe dev", "→".dimmed());
        eprintln!();

        Ok(())
    }

    fn generate_config(&self) -> String {
        format!(
            r#"# Stylepipe configuration
# https://github.com/stylepipe/stylepipe

[project]
name = "{name}"
version = "0.1.0"

[styles]
entry = "styles/styles.css"

[output]
dir = "dist"

[targets]
browsers = "last 2 versions"

[watch]
debounce_ms = 100
pattern = "**/*.css"
"#,
            name = if self.name == "." { "my-styles" } else { &self.name },
        )
    }
}

const ENTRY_TEMPLATE: &str = r#"/* Entry stylesheet. Imported files are bundled into a single output. */
@import "base.css";

.button {
  border-radius: 8px;
  border: 1px solid transparent;
  padding: 0.6em 1.2em;
  font-size: 1em;
  font-weight: 500;
  background-color: #1a1a1a;
  cursor: pointer;
  transition: border-color 0.25s;
  user-select: none;

  &:hover {
    border-color: var(--accent);
  }
}
"#;

const BASE_TEMPLATE: &str = r#":root {
  --accent: #646cff;

  font-family: Inter, system-ui, Avenir, Helvetica, Arial, sans-serif;
  line-height: 1.5;
  font-weight: 400;
}

body {
  margin: 0;
  min-width: 320px;
  min-height: 100vh;
}
"#;
