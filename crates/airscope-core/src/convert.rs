// ── Wire → domain conversion ──
//
// The wire layer stays loose (everything optional); conversion applies
// the domain's normalization: empty strings collapse to None, the epoch
// float becomes a DateTime, and the ISO twin of last_seen is dropped in
// favor of the authoritative epoch value.

use chrono::{DateTime, Utc};

use airscope_api::types::{DeviceRecord, WireKind};

use crate::model::{DeviceKind, DeviceSnapshot, MacAddress};

impl From<WireKind> for DeviceKind {
    fn from(kind: WireKind) -> Self {
        match kind {
            WireKind::Wifi => Self::Wifi,
            WireKind::Ble => Self::Ble,
        }
    }
}

/// Convert one wire record into a domain snapshot.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn snapshot_from_wire(record: DeviceRecord) -> DeviceSnapshot {
    let last_seen = record
        .last_seen
        .and_then(|epoch| DateTime::<Utc>::from_timestamp_millis((epoch * 1000.0) as i64));

    DeviceSnapshot {
        kind: record.kind.into(),
        name: record.name.filter(|s| !s.is_empty()),
        mac: MacAddress::new(&record.mac),
        vendor: record.vendor.filter(|s| !s.is_empty()),
        signal_dbm: record.signal_dbm,
        history: record.history,
        last_seen,
    }
}

/// Convert a full wire payload.
pub fn snapshots_from_wire(records: Vec<DeviceRecord>) -> Vec<DeviceSnapshot> {
    records.into_iter().map(snapshot_from_wire).collect()
}
