// ── View configuration and derivation ──
//
// The canonical list lives in the store; everything the table shows is
// derived from it here, on every refresh or config change, by full
// recomputation. Device counts stay in the tens, so deriving from
// scratch beats incremental bookkeeping.

mod filter;
mod sort;

use std::sync::Arc;

pub use filter::{DeviceFilter, KindFilter};
pub use sort::{SIGNAL_SENTINEL, SortDirection, SortKey, SortOrder, compare, sort_devices};

use crate::model::{DeviceKind, DeviceSnapshot};

/// Everything the user can change about the presented view.
///
/// Owned by the devices screen; passed explicitly to the pure engines.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub filter: DeviceFilter,
    pub sort: SortOrder,
    /// MAC masking on by default — privacy first.
    pub masking: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filter: DeviceFilter::default(),
            sort: SortOrder::default(),
            masking: true,
        }
    }
}

impl ViewConfig {
    /// Derive the presented list: filter, then stable-sort.
    pub fn apply(&self, devices: &[Arc<DeviceSnapshot>]) -> Vec<Arc<DeviceSnapshot>> {
        let mut view: Vec<Arc<DeviceSnapshot>> = devices
            .iter()
            .filter(|d| self.filter.matches(d))
            .cloned()
            .collect();
        sort_devices(&mut view, self.sort);
        view
    }
}

/// Per-kind totals, always computed from the unfiltered canonical list so
/// header counts reflect total scan state regardless of active filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub wifi: usize,
    pub ble: usize,
}

impl KindCounts {
    pub fn of(devices: &[Arc<DeviceSnapshot>]) -> Self {
        let mut counts = Self::default();
        for device in devices {
            match device.kind {
                DeviceKind::Wifi => counts.wifi += 1,
                DeviceKind::Ble => counts.ble += 1,
            }
        }
        counts
    }

    pub fn total(self) -> usize {
        self.wifi + self.ble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MacAddress;
    use pretty_assertions::assert_eq;

    fn snap(kind: DeviceKind, name: &str, signal: i32) -> Arc<DeviceSnapshot> {
        Arc::new(DeviceSnapshot {
            kind,
            name: Some(name.to_owned()),
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff"),
            vendor: None,
            signal_dbm: Some(signal),
            history: vec![],
            last_seen: None,
        })
    }

    fn fixture() -> Vec<Arc<DeviceSnapshot>> {
        vec![
            snap(DeviceKind::Wifi, "Home", -45),
            snap(DeviceKind::Ble, "Tag", -82),
        ]
    }

    #[test]
    fn default_config_keeps_content_and_order() {
        let devices = fixture();
        // Default sort is kind ascending; "ble" < "wifi", so Tag first.
        let view = ViewConfig::default().apply(&devices);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].display_name(), "Tag");
        assert_eq!(view[1].display_name(), "Home");
    }

    #[test]
    fn permissive_filter_preserves_input_order() {
        let devices = fixture();
        let config = ViewConfig::default();
        let filtered: Vec<_> = devices
            .iter()
            .filter(|d| config.filter.matches(d))
            .cloned()
            .collect();
        assert_eq!(filtered.len(), devices.len());
        assert_eq!(filtered[0].display_name(), "Home");
    }

    #[test]
    fn end_to_end_view_semantics() {
        let devices = fixture();

        // Filtering type=wifi yields only "Home".
        let mut config = ViewConfig::default();
        config.filter.kind = KindFilter::Wifi;
        let view = config.apply(&devices);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].display_name(), "Home");

        // Sorting by signal descending with no filter yields Home, Tag.
        let config = ViewConfig {
            sort: SortOrder {
                key: SortKey::Signal,
                direction: SortDirection::Descending,
            },
            ..ViewConfig::default()
        };
        let view = config.apply(&devices);
        let names: Vec<_> = view.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["Home", "Tag"]);

        // Counters come from the unfiltered list, regardless of filter.
        let counts = KindCounts::of(&devices);
        assert_eq!(counts, KindCounts { wifi: 1, ble: 1 });
        assert_eq!(counts.total(), 2);
    }
}
