use catalog_models::HistoryEntry;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Scoped handle on the history insert push channel.
///
/// Dropping the handle (or calling [`HistorySubscription::unsubscribe`]) stops
/// delivery and aborts any background poller feeding it.
#[derive(Debug)]
pub struct HistorySubscription {
    rx: broadcast::Receiver<HistoryEntry>,
    poller: Option<JoinHandle<()>>,
}

impl HistorySubscription {
    pub fn new(rx: broadcast::Receiver<HistoryEntry>) -> Self {
        Self { rx, poller: None }
    }

    /// Subscription fed by a task that owns the sending side
    pub fn with_poller(rx: broadcast::Receiver<HistoryEntry>, poller: JoinHandle<()>) -> Self {
        Self { rx, poller: Some(poller) }
    }

    /// Wait for the next pushed row. `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<HistoryEntry> {
        loop {
            match self.rx.recv().await {
                Ok(entry) => return Some(entry),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "History push receiver lagged, rows dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-delivered row without waiting
    pub fn try_recv(&mut self) -> Option<HistoryEntry> {
        loop {
            match self.rx.try_recv() {
                Ok(entry) => return Some(entry),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "History push receiver lagged, rows dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {
        debug!("Unsubscribing from history inserts");
        drop(self);
    }
}

impl Drop for HistorySubscription {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}
