//! Runtime events and the handle used to send them

use anyhow::Context;
use tokio::sync::mpsc;

use crate::error::Result;

/// Something the user did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Fetch a new poem and show it
    RequestPoem,
    /// Stop the runtime; queued requests are dropped
    Shutdown,
}

/// Cloneable sender side of a [`Runtime`](crate::Runtime)
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    sender: mpsc::Sender<Event>,
}

impl RuntimeHandle {
    pub(crate) fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Ask for a new poem
    pub async fn request_poem(&self) -> Result<()> {
        self.send(Event::RequestPoem).await
    }

    /// Ask the runtime to stop
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Event::Shutdown).await
    }

    /// Send a raw event
    pub async fn send(&self, event: Event) -> Result<()> {
        self.sender
            .send(event)
            .await
            .context("runtime is no longer running")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_sends_events_in_order() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = RuntimeHandle::new(tx);

        handle.request_poem().await.unwrap();
        handle.shutdown().await.unwrap();

        assert_eq!(rx.recv().await, Some(Event::RequestPoem));
        assert_eq!(rx.recv().await, Some(Event::Shutdown));
    }

    #[tokio::test]
    async fn test_send_after_runtime_gone_errors() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = RuntimeHandle::new(tx);

        let err = handle.request_poem().await.unwrap_err();
        assert!(err.to_string().contains("no longer running"));
    }
}
