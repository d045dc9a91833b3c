// ── Monitor facade ──
//
// Owns the fetch lifecycle for one scanner endpoint: builds the HTTP
// client, spawns the poll task, and vends reactive subscriptions to the
// device store. Cheaply cloneable; shared by the TUI action loop and the
// data bridge task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use airscope_api::{SnapshotClient, TransportConfig};

use crate::error::CoreError;
use crate::poller::{DEFAULT_POLL_INTERVAL, poll_task};
use crate::store::{DeviceStore, DeviceStream, RefreshStatus};

/// Configuration for connecting to a scanner daemon.
///
/// Built by the CLI/TUI; core never reads config files.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Scanner base URL (e.g. `http://127.0.0.1:5000`).
    pub endpoint: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay between poll-cycle completion and the next request.
    pub poll_interval: Duration,
    /// Accept self-signed certificates on HTTPS endpoints.
    pub accept_invalid_certs: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://127.0.0.1:5000").expect("static URL"),
            timeout: Duration::from_secs(10),
            poll_interval: DEFAULT_POLL_INTERVAL,
            accept_invalid_certs: false,
        }
    }
}

/// Entry point for consumers: start polling, subscribe to data.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    store: Arc<DeviceStore>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a monitor from configuration. Does NOT start polling —
    /// call [`start`](Self::start).
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                store: Arc::new(DeviceStore::new()),
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DeviceStore> {
        &self.inner.store
    }

    /// Build the snapshot client and spawn the poll loop.
    pub async fn start(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let transport = TransportConfig {
            timeout: config.timeout,
            danger_accept_invalid_certs: config.accept_invalid_certs,
        };
        let client = SnapshotClient::new(config.endpoint.clone(), &transport)?;

        let handle = tokio::spawn(poll_task(
            client,
            Arc::clone(&self.inner.store),
            config.poll_interval,
            self.inner.cancel.child_token(),
        ));
        *self.inner.task.lock().await = Some(handle);

        info!(endpoint = %config.endpoint, "monitor started");
        Ok(())
    }

    /// Cancel the poll loop and wait for it to wind down.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.task.lock().await.take() {
            let _ = handle.await;
        }
        info!("monitor stopped");
    }

    /// Subscribe to canonical-list replacements.
    pub fn devices(&self) -> DeviceStream {
        self.inner.store.subscribe()
    }

    /// Subscribe to the refresh indicator.
    pub fn refresh_status(&self) -> watch::Receiver<RefreshStatus> {
        self.inner.store.refresh_status()
    }
}
