//! Render a saved API response

use anyhow::{Context, Result};
use std::io::Read;

use crate::output::emit;

/// Run the render command
pub async fn run(
    config_path: &str,
    profile: Option<&str>,
    file: &str,
    page: bool,
    output: Option<&str>,
) -> Result<()> {
    let config = super::load_config(config_path, profile)?;

    let body = if file == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read stdin")?;
        body
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))?
    };

    let poems = stanza_core::parse_response(&body).context("Failed to parse poem response")?;
    tracing::debug!("Parsed {} poem(s)", poems.len());

    let html = super::render_html(&config, &poems, page)?;
    emit(&html, output)
}
