//! Call List View - polling synchronizer
//!
//! Keeps an eventually-consistent local copy of the backend's call
//! collection. A driver task fetches on mount, on every timer tick, on each
//! refresh-signal change and on manual request. Every fetch runs as its own
//! task; nothing serializes them, so the [`ResponseOrdering`] decides which
//! response ends up on screen.
//!
//! Unmounting (or dropping the view) cancels the driver. Responses that
//! resolve afterwards are discarded without touching the published state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::domain::{ApiError, Call, ConfigError};
use crate::ports::CallsApi;
use crate::presentation::ListView;

/// Poll interval used when none is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Which response wins when several fetches are in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Responses carry the sequence number of their request; anything older
    /// than the last applied response is dropped.
    #[default]
    IssueOrder,
    /// Whatever resolves last is shown, even if it was issued earlier.
    ArrivalOrder,
}

impl std::fmt::Display for ResponseOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseOrdering::IssueOrder => write!(f, "issue"),
            ResponseOrdering::ArrivalOrder => write!(f, "arrival"),
        }
    }
}

impl std::str::FromStr for ResponseOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "issue" => Ok(ResponseOrdering::IssueOrder),
            "arrival" => Ok(ResponseOrdering::ArrivalOrder),
            _ => Err(ConfigError::UnknownOrdering(s.to_string())),
        }
    }
}

/// List view configuration
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub poll_interval: Duration,
    pub ordering: ResponseOrdering,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            ordering: ResponseOrdering::default(),
        }
    }
}

impl ListConfig {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

/// What caused a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Timer,
    Signal,
    Manual,
}

/// Published list state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    /// Last collection received, replaced verbatim on each applied success
    pub calls: Option<Vec<Call>>,
    /// Set when the most recently applied fetch failed
    pub error: Option<String>,
    /// Fetches issued but not yet resolved
    pub in_flight: usize,
    /// Sequence number of the last applied response (0 before the first)
    pub applied_seq: u64,
}

impl ListSnapshot {
    /// Whether a fetch is currently running (drives the refresh spinner)
    pub fn is_validating(&self) -> bool {
        self.in_flight > 0
    }

    pub fn view(&self) -> ListView {
        ListView::resolve(self.calls.as_deref(), self.error.is_some())
    }
}

struct Shared {
    api: Arc<dyn CallsApi>,
    state: watch::Sender<ListSnapshot>,
    next_seq: AtomicU64,
    ordering: ResponseOrdering,
    cancel: CancellationToken,
}

impl Shared {
    fn fetch(self: &Arc<Self>, trigger: FetchTrigger) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.in_flight += 1);
        tracing::trace!(seq, ?trigger, "Fetch issued");

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = shared.api.list_calls().await;
            shared.apply(seq, result);
        });
    }

    fn apply(&self, seq: u64, result: Result<Vec<Call>, ApiError>) {
        if let Err(e) = &result {
            tracing::warn!(seq, error = %e, "Failed to fetch calls");
        }

        let ordering = self.ordering;
        let cancel = &self.cancel;
        // Checked under the state lock so an unmount cannot slip in between.
        self.state.send_if_modified(|s| {
            if cancel.is_cancelled() {
                tracing::debug!(seq, "List view unmounted, discarding response");
                return false;
            }

            s.in_flight = s.in_flight.saturating_sub(1);

            if ordering == ResponseOrdering::IssueOrder && seq < s.applied_seq {
                tracing::debug!(seq, applied = s.applied_seq, "Discarding stale response");
                return true;
            }

            s.applied_seq = seq;
            match result {
                Ok(calls) => {
                    s.calls = Some(calls);
                    s.error = None;
                }
                Err(e) => {
                    s.error = Some(e.to_string());
                }
            }
            true
        });
    }
}

/// Cloneable handle for triggering refreshes and observing state
#[derive(Clone)]
pub struct ListHandle {
    manual_tx: mpsc::UnboundedSender<()>,
    state_rx: watch::Receiver<ListSnapshot>,
}

impl ListHandle {
    /// Request an immediate out-of-band fetch.
    ///
    /// Returns `false` if the view has been unmounted.
    pub fn refresh(&self) -> bool {
        self.manual_tx.send(()).is_ok()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state_rx.clone()
    }
}

/// Mounted call list. Dropping it unmounts.
pub struct CallListView {
    shared: Arc<Shared>,
    handle: ListHandle,
    driver: Option<JoinHandle<()>>,
}

impl CallListView {
    /// Mount the view and start polling. Must be called within a tokio runtime.
    pub fn mount(
        api: Arc<dyn CallsApi>,
        refresh_signal: watch::Receiver<u64>,
        config: ListConfig,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(ListSnapshot::default());
        let (manual_tx, manual_rx) = mpsc::unbounded_channel();

        let shared = Arc::new(Shared {
            api,
            state: state_tx,
            next_seq: AtomicU64::new(0),
            ordering: config.ordering,
            cancel: CancellationToken::new(),
        });

        tracing::info!(
            "Call list mounted (interval: {:?}, ordering: {})",
            config.poll_interval,
            config.ordering
        );

        let driver = tokio::spawn(run(
            Arc::clone(&shared),
            refresh_signal,
            manual_rx,
            config.poll_interval,
        ));

        Self {
            shared,
            handle: ListHandle {
                manual_tx,
                state_rx,
            },
            driver: Some(driver),
        }
    }

    pub fn handle(&self) -> ListHandle {
        self.handle.clone()
    }

    /// Request an immediate out-of-band fetch
    pub fn refresh(&self) -> bool {
        self.handle.refresh()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.handle.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.handle.subscribe()
    }

    pub fn view(&self) -> ListView {
        self.snapshot().view()
    }

    /// Stop polling and wait for the driver to exit.
    ///
    /// Fetches already in flight keep running but their results are dropped.
    pub async fn unmount(mut self) {
        self.shared.cancel.cancel();
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.await {
                tracing::warn!(error = %e, "List driver task ended abnormally");
            }
        }
        tracing::info!("Call list unmounted");
    }
}

impl Drop for CallListView {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

async fn run(
    shared: Arc<Shared>,
    mut refresh_signal: watch::Receiver<u64>,
    mut manual_rx: mpsc::UnboundedReceiver<()>,
    poll_interval: Duration,
) {
    if poll_interval.is_zero() {
        tracing::warn!("Zero poll interval, falling back to {:?}", DEFAULT_POLL_INTERVAL);
    }
    let period = if poll_interval.is_zero() { DEFAULT_POLL_INTERVAL } else { poll_interval };
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    refresh_signal.borrow_and_update();
    let mut signal_open = true;

    loop {
        tokio::select! {
            biased;

            _ = shared.cancel.cancelled() => break,

            // The first tick completes immediately: that is the mount fetch.
            _ = ticker.tick() => shared.fetch(FetchTrigger::Timer),

            changed = refresh_signal.changed(), if signal_open => match changed {
                // The value is opaque: any change means one fetch.
                Ok(()) => {
                    refresh_signal.borrow_and_update();
                    shared.fetch(FetchTrigger::Signal);
                }
                Err(_) => {
                    tracing::debug!("Refresh signal closed");
                    signal_open = false;
                }
            },

            Some(()) = manual_rx.recv() => shared.fetch(FetchTrigger::Manual),
        }
    }

    tracing::debug!("List driver stopped");
}
