//! Interactive mode: one poem per key press

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use stanza_core::{FileSource, HttpSource, PageRenderer, PoemFormatter, PoemSource};
use stanza_runtime::{Display, Runtime, RuntimeHandle};

use crate::output::{FileDisplay, StdoutDisplay};

/// Run the interactive command
pub async fn run(
    config_path: &str,
    profile: Option<&str>,
    page: bool,
    output: Option<&str>,
    from: Option<&str>,
) -> Result<()> {
    let config = super::load_config(config_path, profile)?;

    let source: Arc<dyn PoemSource> = match from {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(
            HttpSource::from_config(&config.project.source)
                .context("Failed to create HTTP client")?,
        ),
    };
    let formatter = PoemFormatter::new(config.project.render.clone());
    let timeout = Duration::from_secs(config.project.source.timeout_secs);
    let page = if page {
        Some(PageRenderer::from_config(&config).context("Failed to load page template")?)
    } else {
        None
    };

    match output {
        Some(path) => serve(source, formatter, page, timeout, FileDisplay::new(path)).await,
        None => serve(source, formatter, page, timeout, StdoutDisplay).await,
    }
}

async fn serve<D: Display + 'static>(
    source: Arc<dyn PoemSource>,
    formatter: PoemFormatter,
    page: Option<PageRenderer>,
    timeout: Duration,
    display: D,
) -> Result<()> {
    let mut runtime = Runtime::new(source, formatter, display).with_timeout(timeout);
    if let Some(page) = page {
        runtime = runtime.with_page(page);
    }
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    eprintln!("Press Enter for a poem, q to quit.");
    read_commands(handle).await?;

    let stats = task.await.context("Runtime task panicked")??;
    tracing::debug!("{:?}", stats);
    Ok(())
}

/// Forward stdin lines as events until "q" or end of input
async fn read_commands(handle: RuntimeHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "quit" | "exit" => {
                handle.shutdown().await?;
                return Ok(());
            }
            "" | "n" | "next" => handle.request_poem().await?,
            other => eprintln!("Unknown command '{other}' (Enter for a poem, q to quit)"),
        }
    }
    // End of input: dropping the handle lets queued requests finish
    Ok(())
}
