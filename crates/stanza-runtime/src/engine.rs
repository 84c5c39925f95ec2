//! Poem request loop

use anyhow::{Context, anyhow};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use stanza_core::{PageRenderer, PoemFormatter, PoemSource};

use crate::display::Display;
use crate::error::Result;
use crate::events::{Event, RuntimeHandle};

const CHANNEL_CAPACITY: usize = 32;

/// Default bound on a single fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Counters reported when the runtime stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Poem requests received
    pub requests: usize,
    /// Fetches actually performed
    pub fetches: usize,
    /// Poems handed to the display
    pub shown: usize,
    /// Fetches that failed at any stage
    pub failed: usize,
}

/// Runtime that serves poem requests one at a time
pub struct Runtime<D: Display> {
    worker: Worker<D>,
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
}

struct Worker<D> {
    source: Arc<dyn PoemSource>,
    formatter: PoemFormatter,
    page: Option<PageRenderer>,
    display: D,
    timeout: Duration,
}

/// Outcome of emptying the queue after a fetch
#[derive(Default)]
struct Drained {
    requests: usize,
    shutdown: bool,
    closed: bool,
}

impl<D: Display> Runtime<D> {
    /// Create a runtime; nothing happens until [`Runtime::run`] is awaited
    pub fn new(source: Arc<dyn PoemSource>, formatter: PoemFormatter, display: D) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            worker: Worker {
                source,
                formatter,
                page: None,
                display,
                timeout: DEFAULT_TIMEOUT,
            },
            sender,
            receiver,
        }
    }

    /// Bound every fetch by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.worker.timeout = timeout;
        self
    }

    /// Show full pages instead of bare fragments
    pub fn with_page(mut self, page: PageRenderer) -> Self {
        self.worker.page = Some(page);
        self
    }

    /// Handle for sending events to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle::new(self.sender.clone())
    }

    /// Serve events until [`Event::Shutdown`] or until every handle is dropped
    pub async fn run(self) -> Result<RunStats> {
        let Self {
            mut worker,
            sender,
            mut receiver,
        } = self;
        // Only external handles keep the channel open
        drop(sender);

        tracing::info!("Runtime started (source: {})", worker.source.name());
        let mut stats = RunStats::default();

        'events: while let Some(event) = receiver.recv().await {
            match event {
                Event::Shutdown => break,
                Event::RequestPoem => {
                    stats.requests += 1;
                    loop {
                        worker.serve(&mut stats).await;

                        let drained = drain(&mut receiver);
                        stats.requests += drained.requests;
                        if drained.shutdown {
                            break 'events;
                        }
                        if drained.requests == 0 {
                            break;
                        }
                        if drained.requests > 1 {
                            tracing::debug!(
                                "Coalesced {} queued requests into one fetch",
                                drained.requests
                            );
                        }
                        if drained.closed {
                            worker.serve(&mut stats).await;
                            break 'events;
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Runtime stopped: {} request(s), {} fetch(es), {} shown, {} failed",
            stats.requests,
            stats.fetches,
            stats.shown,
            stats.failed
        );
        Ok(stats)
    }
}

impl<D: Display> Worker<D> {
    async fn serve(&mut self, stats: &mut RunStats) {
        stats.fetches += 1;
        match self.fetch_and_show().await {
            Ok(()) => stats.shown += 1,
            Err(e) => {
                stats.failed += 1;
                tracing::warn!("Poem request failed, keeping previous poem: {:#}", e);
            }
        }
    }

    async fn fetch_and_show(&mut self) -> Result<()> {
        let poems = tokio::time::timeout(self.timeout, self.source.fetch())
            .await
            .map_err(|_| anyhow!("fetch timed out after {:?}", self.timeout))?
            .with_context(|| format!("fetching from {}", self.source.name()))?;

        let fragment = self.formatter.format_response(&poems)?;
        let html = match &self.page {
            Some(page) => page.render(&poems[0], &fragment)?,
            None => fragment,
        };

        self.display
            .show(&html)
            .await
            .context("updating display")?;
        tracing::info!("Showing \"{}\" by {}", poems[0].title, poems[0].author);
        Ok(())
    }
}

fn drain(receiver: &mut mpsc::Receiver<Event>) -> Drained {
    let mut drained = Drained::default();
    loop {
        match receiver.try_recv() {
            Ok(Event::RequestPoem) => drained.requests += 1,
            Ok(Event::Shutdown) => {
                drained.shutdown = true;
                return drained;
            }
            Err(TryRecvError::Empty) => return drained,
            Err(TryRecvError::Disconnected) => {
                drained.closed = true;
                return drained;
            }
        }
    }
}
