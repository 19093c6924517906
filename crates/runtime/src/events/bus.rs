//! Broadcast notification channel.

use tokio::sync::broadcast;

use super::types::Notice;

/// Fire-and-forget sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notification channel backed by a broadcast queue.
///
/// Publishing never blocks and never fails; notices raised while nobody is
/// subscribed are discarded.
#[derive(Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notice>,
}

impl NotificationBus {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity.max(1)).0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationBus {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            tracing::trace!("No subscribers for notices");
        }
    }
}
