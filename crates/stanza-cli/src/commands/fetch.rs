//! Fetch one random poem

use anyhow::{Context, Result};
use stanza_core::{HttpSource, PoemSource};

use crate::output::emit;

/// Run the fetch command
pub async fn run(
    config_path: &str,
    profile: Option<&str>,
    page: bool,
    output: Option<&str>,
) -> Result<()> {
    let config = super::load_config(config_path, profile)?;
    let source = HttpSource::from_config(&config.project.source)
        .context("Failed to create HTTP client")?;

    tracing::info!("Fetching poem from {}", source.url());
    let poems = source.fetch().await.context("Failed to fetch poem")?;

    let html = super::render_html(&config, &poems, page)?;
    emit(&html, output)
}
