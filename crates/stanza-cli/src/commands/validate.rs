//! Validate configuration command

use anyhow::{Context, Result};
use stanza_core::{Config, PageRenderer, PoemQuery};

/// Run the validate command
pub async fn run(config_path: &str, profile: Option<&str>) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let config =
        Config::load_with_profile(config_path, profile).context("Failed to load configuration")?;

    if let Some(name) = &config.profile {
        tracing::info!("✓ Profile: {}", name);
    }
    tracing::info!(
        "✓ Source URL: {}",
        PoemQuery::from(&config.project.source).url()
    );
    tracing::info!(
        "✓ Stanza breaks: {:?}",
        config.project.render.stanza_breaks
    );

    PageRenderer::from_config(&config).context("Invalid page template")?;
    match config.page_template_path() {
        Some(path) => tracing::info!("✓ Page template: {}", path.display()),
        None => tracing::info!("✓ Page template: built-in"),
    }

    tracing::info!("✓ Configuration is valid");
    Ok(())
}
