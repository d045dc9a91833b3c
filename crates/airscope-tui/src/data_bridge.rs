//! Data bridge — connects [`Monitor`] subscriptions to TUI actions.
//!
//! Runs as a background task: starts the monitor's poll loop, then
//! forwards every canonical-list replacement and refresh-indicator change
//! as an [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use airscope_core::Monitor;

use crate::action::Action;

/// Spawn the data bridge. Shuts the monitor down cleanly on cancellation.
pub async fn spawn_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    if let Err(e) = monitor.start().await {
        warn!(error = %e, "failed to start monitor");
        let _ = action_tx.send(Action::RefreshStatusChanged(
            airscope_core::RefreshStatus::Failed(e.to_string()),
        ));
        return;
    }

    let mut devices = monitor.devices();
    let mut refresh = monitor.refresh_status();

    // Push the initial snapshot so the screen has data immediately on
    // reconnect-style restarts.
    let initial = devices.current().clone();
    if !initial.is_empty() {
        let _ = action_tx.send(Action::DevicesUpdated(initial));
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = devices.changed() => {
                let _ = action_tx.send(Action::DevicesUpdated(snapshot));
            }

            Ok(()) = refresh.changed() => {
                let status = refresh.borrow_and_update().clone();
                let _ = action_tx.send(Action::RefreshStatusChanged(status));
            }
        }
    }

    monitor.stop().await;
    debug!("data bridge shut down");
}
