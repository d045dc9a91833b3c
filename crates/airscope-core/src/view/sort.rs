// ── Stable sort over device snapshots ──
//
// Key extraction produces a totally-ordered SortValue so absent or
// non-finite fields can never poison the comparator: missing signals get
// a sentinel far below any real reading, missing timestamps get zero.
// slice::sort_by is stable, so ties keep their prior relative order and
// rows don't jitter between refreshes.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::model::DeviceSnapshot;

/// Sentinel for an absent signal reading. Far below the physical range,
/// so unsampled devices sort last in descending (strongest-first) order.
pub const SIGNAL_SENTINEL: i64 = -9999;

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Kind,
    Name,
    Mac,
    Signal,
    LastSeen,
}

impl SortKey {
    /// Direction applied when this column is first selected. Signal and
    /// last-seen read naturally strongest/most-recent first.
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Signal | Self::LastSeen => SortDirection::Descending,
            Self::Kind | Self::Name | Self::Mac => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Name => "Name",
            Self::Mac => "Address",
            Self::Signal => "Signal",
            Self::LastSeen => "Seen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow glyph for the active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort column + direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            key: SortKey::Kind,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortOrder {
    /// Select a column: re-selecting the active column toggles direction,
    /// switching columns resets to that column's default direction.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = key.default_direction();
        }
    }
}

/// Extracted comparison key. Text compares before numbers never happens
/// in practice — a given SortKey always extracts the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Number(i64),
}

fn extract(snapshot: &DeviceSnapshot, key: SortKey) -> SortValue {
    match key {
        SortKey::Kind => SortValue::Text(snapshot.kind.to_string()),
        SortKey::Name => SortValue::Text(
            snapshot
                .name
                .as_deref()
                .unwrap_or("")
                .to_lowercase(),
        ),
        SortKey::Mac => SortValue::Text(snapshot.mac.as_str().to_lowercase()),
        SortKey::Signal => {
            SortValue::Number(snapshot.signal_dbm.map_or(SIGNAL_SENTINEL, i64::from))
        }
        SortKey::LastSeen => SortValue::Number(
            snapshot
                .last_seen
                .map_or(0, |ts| ts.timestamp_millis()),
        ),
    }
}

/// Sort snapshots in place. Stable for equal keys.
pub fn sort_devices(devices: &mut [Arc<DeviceSnapshot>], order: SortOrder) {
    devices.sort_by(|a, b| {
        let ord = extract(a, order.key).cmp(&extract(b, order.key));
        match order.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Compare two snapshots under an order — exposed for tests and ad-hoc use.
pub fn compare(a: &DeviceSnapshot, b: &DeviceSnapshot, order: SortOrder) -> Ordering {
    let ord = extract(a, order.key).cmp(&extract(b, order.key));
    match order.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}
