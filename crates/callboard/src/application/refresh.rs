//! Refresh signal shared between the form and the list view
//!
//! A monotonically increasing counter. The list view only cares that it
//! changed; the value itself carries no meaning.

use std::sync::Arc;
use tokio::sync::watch;

/// Change-detection counter, bumped once per successful call creation
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    tx: Arc<watch::Sender<u64>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Increment by exactly one and return the new value
    pub fn bump(&self) -> u64 {
        let mut value = 0;
        self.tx.send_modify(|v| {
            *v += 1;
            value = *v;
        });
        tracing::debug!(value, "Refresh signal bumped");
        value
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Receiver observing every change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}
