//! Write a starter configuration

use anyhow::Result;
use std::fs;
use std::path::Path;

use stanza_core::config::CONFIG_FILE;

const STARTER_CONFIG: &str = r#"# Stanza configuration

source:
  base_url: https://poetrydb.org
  count: 1
  # Exact number of lines; null accepts poems of any length
  line_count: 12
  timeout_secs: 10

render:
  line_break: "<br>"
  # collapse: blank-line runs form one break; preserve: every blank line is a break
  stanza_breaks: collapse
  # Escape title, author and lines before wrapping them in tags
  escape: false

page:
  # Custom minijinja template for --page output (gets title, author, poem)
  template: null

# Use with: stanza fetch --profile short
profiles:
  short:
    source:
      line_count: 4
  long:
    source:
      line_count: 40
"#;

/// Run the init command
pub async fn run(path: &str) -> Result<()> {
    let dir = Path::new(path);

    // Create directory if it doesn't exist
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            dir.display(),
            CONFIG_FILE
        );
    }

    fs::write(&config_path, STARTER_CONFIG)?;

    tracing::info!("✓ Created {}", config_path.display());
    tracing::info!("Next steps:");
    tracing::info!("  stanza validate    # Check configuration");
    tracing::info!("  stanza fetch       # Print a random poem");

    Ok(())
}
