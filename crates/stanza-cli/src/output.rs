//! Output targets for rendered poems

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

use stanza_runtime::Display;

/// Write `html` to `path`, or to stdout followed by a newline
pub fn emit(html: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("Failed to write {path}"))?;
            tracing::info!("Wrote {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{html}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Prints every poem to stdout
pub struct StdoutDisplay;

#[async_trait]
impl Display for StdoutDisplay {
    async fn show(&mut self, html: &str) -> Result<()> {
        emit(html, None)
    }
}

/// Rewrites one file with the latest poem
pub struct FileDisplay {
    path: PathBuf,
}

impl FileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Display for FileDisplay {
    async fn show(&mut self, html: &str) -> Result<()> {
        tokio::fs::write(&self.path, html)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!("Updated {}", self.path.display());
        Ok(())
    }
}
