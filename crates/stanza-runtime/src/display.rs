//! Display surfaces
//!
//! A display receives finished markup. It is only called after a poem was
//! fetched and formatted successfully, so whatever it showed last stays up
//! when a request fails.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Where rendered poems end up
#[async_trait]
pub trait Display: Send {
    /// Replace the current content with `html`
    async fn show(&mut self, html: &str) -> Result<()>;
}

/// In-memory display; clones share the same content
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    shown: Arc<Mutex<Vec<String>>>,
}

impl MemoryDisplay {
    /// What is currently shown, if anything
    pub fn current(&self) -> Option<String> {
        self.history().pop()
    }

    /// Everything shown so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Display for MemoryDisplay {
    async fn show(&mut self, html: &str) -> Result<()> {
        self.shown
            .lock()
            .map_err(|_| anyhow::anyhow!("display state poisoned"))?
            .push(html.to_string());
        Ok(())
    }
}
