// ── Snapshot polling task ──
//
// One unbounded, strictly sequential loop: fetch, apply, sleep, repeat.
// The delay runs from cycle COMPLETION, not cycle start — a slow or hung
// upstream self-throttles to one request in flight, ever. Failures mark
// the refresh indicator and keep looping; there is no backoff growth and
// no retry cap.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use airscope_api::SnapshotClient;

use crate::convert::snapshots_from_wire;
use crate::store::DeviceStore;

/// Delay between cycle completion and the next request.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Run the poll loop until cancelled.
///
/// Each cycle fetches one snapshot; on success the store's canonical list
/// is replaced wholesale, on failure the refresh indicator records the
/// error. Either way the next cycle starts a fixed `interval` after this
/// one finished.
pub async fn poll_task(
    client: SnapshotClient,
    store: Arc<DeviceStore>,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = client.fetch_devices() => {
                match result {
                    Ok(payload) => {
                        let snapshots = snapshots_from_wire(payload.devices);
                        debug!(count = snapshots.len(), "snapshot applied");
                        store.replace_all(snapshots);
                    }
                    Err(e) => {
                        warn!(error = %e, "snapshot poll failed");
                        store.mark_failed(e.to_string());
                    }
                }
            }
        }

        // Delay measured from completion — never overlaps requests.
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }

    debug!("poll task stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::RefreshStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn wait_for<F: Fn(&RefreshStatus) -> bool>(
        rx: &mut tokio::sync::watch::Receiver<RefreshStatus>,
        pred: F,
    ) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if pred(&rx.borrow()) {
                    return;
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn recovers_from_failure_on_next_cycle() {
        let server = MockServer::start().await;

        // First cycle: 500. Every later cycle: a one-device payload.
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "devices": [{"type": "wifi", "mac": "aa:bb:cc:dd:ee:ff", "signal_dbm": -45}]
            })))
            .mount(&server)
            .await;

        let client =
            SnapshotClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
        let store = Arc::new(DeviceStore::new());
        let cancel = CancellationToken::new();
        let mut status = store.refresh_status();

        let task = tokio::spawn(poll_task(
            client,
            Arc::clone(&store),
            Duration::from_millis(10),
            cancel.clone(),
        ));

        wait_for(&mut status, |s| matches!(s, RefreshStatus::Failed(_))).await;
        assert!(store.is_empty(), "failure leaves the list untouched");

        wait_for(&mut status, |s| matches!(s, RefreshStatus::Ok(_))).await;
        assert_eq!(store.len(), 1);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": [] })))
            .mount(&server)
            .await;

        let client =
            SnapshotClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
        let store = Arc::new(DeviceStore::new());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(poll_task(
            client,
            Arc::clone(&store),
            Duration::from_millis(10),
            cancel.clone(),
        ));

        let mut status = store.refresh_status();
        wait_for(&mut status, |s| matches!(s, RefreshStatus::Ok(_))).await;

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
    }
}
