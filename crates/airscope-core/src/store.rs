// ── Reactive device store ──
//
// Full-replacement storage: every successful poll swaps the whole
// canonical list. The upstream scanner owns history retention and device
// lifetime; this store only projects whatever the latest snapshot says.
// watch channels give push-based change notification to subscribers.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::DeviceSnapshot;

/// Outcome of the most recent poll cycle, surfaced as the "last refreshed"
/// indicator. Failure is transient by design — the loop keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefreshStatus {
    /// No cycle has completed yet.
    #[default]
    Pending,
    /// Last cycle succeeded at this instant.
    Ok(DateTime<Utc>),
    /// Last cycle failed; the message is display-ready.
    Failed(String),
}

/// Reactive storage for the canonical device list.
pub struct DeviceStore {
    devices: watch::Sender<Arc<Vec<Arc<DeviceSnapshot>>>>,
    refresh: watch::Sender<RefreshStatus>,
}

impl DeviceStore {
    pub fn new() -> Self {
        let (devices, _) = watch::channel(Arc::new(Vec::new()));
        let (refresh, _) = watch::channel(RefreshStatus::default());
        Self { devices, refresh }
    }

    /// Replace the canonical list wholesale and stamp the refresh
    /// indicator. No merging: a device absent from this snapshot is gone.
    pub fn replace_all(&self, snapshots: Vec<DeviceSnapshot>) {
        let list: Vec<Arc<DeviceSnapshot>> = snapshots.into_iter().map(Arc::new).collect();
        // send_modify updates unconditionally, even with zero receivers.
        self.devices.send_modify(|current| *current = Arc::new(list));
        // send_replace (not send) so the status updates even with zero receivers.
        self.refresh.send_replace(RefreshStatus::Ok(Utc::now()));
    }

    /// Record a failed cycle. The canonical list is left untouched.
    pub fn mark_failed(&self, message: impl Into<String>) {
        self.refresh.send_replace(RefreshStatus::Failed(message.into()));
    }

    /// Current snapshot (cheap Arc clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<DeviceSnapshot>>> {
        self.devices.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.devices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.borrow().is_empty()
    }

    /// Subscribe to canonical-list changes.
    pub fn subscribe(&self) -> DeviceStream {
        DeviceStream::new(self.devices.subscribe())
    }

    /// Subscribe to refresh-indicator changes.
    pub fn refresh_status(&self) -> watch::Receiver<RefreshStatus> {
        self.refresh.subscribe()
    }
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to the canonical device list.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed`](Self::changed) or conversion to a `Stream`.
pub struct DeviceStream {
    current: Arc<Vec<Arc<DeviceSnapshot>>>,
    receiver: watch::Receiver<Arc<Vec<Arc<DeviceSnapshot>>>>,
}

impl DeviceStream {
    fn new(receiver: watch::Receiver<Arc<Vec<Arc<DeviceSnapshot>>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at the last observation point.
    pub fn current(&self) -> &Arc<Vec<Arc<DeviceSnapshot>>> {
        &self.current
    }

    /// The latest snapshot (may be newer than `current`).
    pub fn latest(&self) -> Arc<Vec<Arc<DeviceSnapshot>>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next replacement, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<DeviceSnapshot>>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for combinator use.
    pub fn into_stream(self) -> DeviceWatchStream {
        DeviceWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter over the store's watch channel.
pub struct DeviceWatchStream {
    inner: WatchStream<Arc<Vec<Arc<DeviceSnapshot>>>>,
}

impl Stream for DeviceWatchStream {
    type Item = Arc<Vec<Arc<DeviceSnapshot>>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceKind, MacAddress};

    fn snap(mac: &str) -> DeviceSnapshot {
        DeviceSnapshot {
            kind: DeviceKind::Wifi,
            name: None,
            mac: MacAddress::new(mac),
            vendor: None,
            signal_dbm: Some(-60),
            history: vec![-60],
            last_seen: None,
        }
    }

    #[test]
    fn replace_all_swaps_wholesale() {
        let store = DeviceStore::new();
        store.replace_all(vec![snap("aa"), snap("bb")]);
        assert_eq!(store.len(), 2);

        // A device missing from the next snapshot disappears.
        store.replace_all(vec![snap("bb")]);
        let current = store.snapshot();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].mac.as_str(), "bb");
    }

    #[test]
    fn replace_marks_refresh_ok() {
        let store = DeviceStore::new();
        assert_eq!(*store.refresh_status().borrow(), RefreshStatus::Pending);
        store.replace_all(vec![]);
        assert!(matches!(*store.refresh_status().borrow(), RefreshStatus::Ok(_)));
    }

    #[test]
    fn failure_keeps_previous_list() {
        let store = DeviceStore::new();
        store.replace_all(vec![snap("aa")]);
        store.mark_failed("connection refused");
        assert_eq!(store.len(), 1, "stale data beats no data");
        assert_eq!(
            *store.refresh_status().borrow(),
            RefreshStatus::Failed("connection refused".into())
        );
    }

    #[tokio::test]
    async fn stream_sees_replacement() {
        let store = DeviceStore::new();
        let mut stream = store.subscribe();
        assert!(stream.current().is_empty());

        store.replace_all(vec![snap("aa")]);
        let next = stream.changed().await.unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(stream.current().len(), 1);
    }

    #[tokio::test]
    async fn stream_ends_when_store_drops() {
        let store = DeviceStore::new();
        let mut stream = store.subscribe();
        drop(store);
        assert!(stream.changed().await.is_none());
    }
}
