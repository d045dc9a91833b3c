//! Cancellable scheduled-action debouncer.
//!
//! Coalesces a burst of rapid events into a single delayed action: each
//! `schedule` call aborts any pending task and starts a fresh quiet-period
//! timer, so only the last event in a burst actually fires. Holding at
//! most one pending task bounds work under heavy typing without ever
//! dropping the final state.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::action::Action;

/// Quiet period for filter-input coalescing.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(120);

pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to fire after the quiet period, cancelling any
    /// previously scheduled action.
    pub fn schedule(&mut self, tx: &UnboundedSender<Action>, action: Action) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let tx = tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action);
        }));
    }

    /// Drop any pending action without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
