//! Domain layer between `airscope-api` and the presentation surface.
//!
//! This crate owns everything with real state-machine or algorithmic
//! content in airscope:
//!
//! - **[`Monitor`]** — Facade owning the fetch lifecycle: builds the
//!   snapshot client, spawns the polling task, and vends reactive
//!   subscriptions to the device store.
//!
//! - **[`DeviceStore`]** — Reactive storage built on `tokio::sync::watch`.
//!   The canonical device list is fully replaced on every successful poll;
//!   consumers subscribe via [`DeviceStream`].
//!
//! - **View engines** ([`view`]) — Pure filter predicate and stable
//!   multi-key sort over device snapshots, driven by an explicit
//!   [`ViewConfig`](view::ViewConfig) rather than ambient state.
//!
//! - **[`mask`]** — MAC-address privacy masking: a pure display transform
//!   that redacts the device-specific octets while keeping the
//!   vendor-identifying prefix readable.
//!
//! - **[`chart`]** — Signal-history chart geometry on a fixed
//!   `[-100, -30]` dBm scale so sparklines stay visually comparable
//!   across devices.

pub mod chart;
pub mod convert;
pub mod error;
pub mod mask;
pub mod model;
pub mod monitor;
pub mod poller;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use model::{DeviceKind, DeviceSnapshot, MacAddress, SignalBand};
pub use monitor::{Monitor, MonitorConfig};
pub use store::{DeviceStore, DeviceStream, RefreshStatus};
pub use view::{DeviceFilter, KindCounts, KindFilter, SortDirection, SortKey, SortOrder, ViewConfig};
