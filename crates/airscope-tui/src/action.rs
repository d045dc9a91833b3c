//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use airscope_core::{DeviceSnapshot, RefreshStatus, SortKey};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data events (from the data bridge) ─────────────────────────
    DevicesUpdated(Arc<Vec<Arc<DeviceSnapshot>>>),
    RefreshStatusChanged(RefreshStatus),

    // ── Search ─────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── View configuration ─────────────────────────────────────────
    /// Debounce fired: re-derive the presented view from current config.
    CommitView,
    CycleKindFilter,
    SortColumn(SortKey),
    /// Adjust the minimum signal bound by a dBm delta.
    AdjustMinSignal(i32),
    /// Adjust the maximum signal bound by a dBm delta.
    AdjustMaxSignal(i32),
    ClearSignalBounds,
    ToggleMasking,

    // ── Selection / detail ─────────────────────────────────────────
    OpenDetail,
    CloseDetail,

    // ── Help ───────────────────────────────────────────────────────
    ToggleHelp,
}
