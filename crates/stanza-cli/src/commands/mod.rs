//! CLI command implementations

use anyhow::{Context, Result};
use stanza_core::{Config, PageRenderer, PoemFormatter, PoemRecord};

pub mod fetch;
pub mod init;
pub mod interactive;
pub mod render;
pub mod validate;

/// Load configuration, falling back to defaults when the file is absent
pub(crate) fn load_config(config_path: &str, profile: Option<&str>) -> Result<Config> {
    Config::load_or_default(config_path, profile).context("Failed to load configuration")
}

/// Format the first poem, optionally as a full page
pub(crate) fn render_html(config: &Config, poems: &[PoemRecord], page: bool) -> Result<String> {
    let formatter = PoemFormatter::new(config.project.render.clone());
    let fragment = formatter
        .format_response(poems)
        .context("Failed to format poem")?;

    if !page {
        return Ok(fragment);
    }
    let renderer = PageRenderer::from_config(config).context("Failed to load page template")?;
    Ok(renderer.render(&poems[0], &fragment)?)
}
