// ── Filter predicate for device snapshots ──
//
// Pure function of (snapshot, config): no ambient state, idempotent,
// order-independent. All rules AND together.

use crate::model::{DeviceKind, DeviceSnapshot};

/// Which device class to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Wifi,
    Ble,
}

impl KindFilter {
    pub fn matches(self, kind: DeviceKind) -> bool {
        match self {
            Self::All => true,
            Self::Wifi => kind == DeviceKind::Wifi,
            Self::Ble => kind == DeviceKind::Ble,
        }
    }

    /// Next filter in cycle order (All → Wifi → Ble → All).
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Wifi,
            Self::Wifi => Self::Ble,
            Self::Ble => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Wifi => "WiFi",
            Self::Ble => "BLE",
        }
    }
}

/// Filter configuration for the device view.
///
/// The default value matches every snapshot.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    /// Case-insensitive substring query over name, mac, and vendor.
    pub query: String,
    pub kind: KindFilter,
    /// Snapshots with a present reading below this are excluded.
    /// Snapshots without a reading are never excluded by bounds.
    pub min_signal: Option<i32>,
    /// Symmetric upper bound.
    pub max_signal: Option<i32>,
}

impl DeviceFilter {
    /// Whether `snapshot` passes every active rule.
    pub fn matches(&self, snapshot: &DeviceSnapshot) -> bool {
        if !self.kind.matches(snapshot.kind) {
            return false;
        }

        if let (Some(min), Some(dbm)) = (self.min_signal, snapshot.signal_dbm) {
            if dbm < min {
                return false;
            }
        }
        if let (Some(max), Some(dbm)) = (self.max_signal, snapshot.signal_dbm) {
            if dbm > max {
                return false;
            }
        }

        if !self.query.is_empty() {
            let haystack = format!(
                "{} {} {}",
                snapshot.name.as_deref().unwrap_or(""),
                snapshot.mac.as_str(),
                snapshot.vendor.as_deref().unwrap_or(""),
            )
            .to_lowercase();
            if !haystack.contains(&self.query.to_lowercase()) {
                return false;
            }
        }

        true
    }

    /// Whether any rule is active at all.
    pub fn is_permissive(&self) -> bool {
        self.query.is_empty()
            && self.kind == KindFilter::All
            && self.min_signal.is_none()
            && self.max_signal.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MacAddress;

    fn snap(kind: DeviceKind, name: &str, signal: Option<i32>) -> DeviceSnapshot {
        DeviceSnapshot {
            kind,
            name: Some(name.to_owned()),
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff"),
            vendor: Some("Acme".to_owned()),
            signal_dbm: signal,
            history: vec![],
            last_seen: None,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = DeviceFilter::default();
        assert!(filter.is_permissive());
        assert!(filter.matches(&snap(DeviceKind::Wifi, "Home", Some(-45))));
        assert!(filter.matches(&snap(DeviceKind::Ble, "", None)));
    }

    #[test]
    fn kind_filter_is_exact() {
        let filter = DeviceFilter {
            kind: KindFilter::Wifi,
            ..DeviceFilter::default()
        };
        assert!(filter.matches(&snap(DeviceKind::Wifi, "Home", None)));
        assert!(!filter.matches(&snap(DeviceKind::Ble, "Tag", None)));
    }

    #[test]
    fn min_bound_excludes_weaker() {
        let filter = DeviceFilter {
            min_signal: Some(-70),
            ..DeviceFilter::default()
        };
        assert!(filter.matches(&snap(DeviceKind::Wifi, "a", Some(-60))));
        assert!(filter.matches(&snap(DeviceKind::Wifi, "b", Some(-70))));
        assert!(!filter.matches(&snap(DeviceKind::Wifi, "c", Some(-71))));
    }

    #[test]
    fn max_bound_excludes_stronger() {
        let filter = DeviceFilter {
            max_signal: Some(-50),
            ..DeviceFilter::default()
        };
        assert!(filter.matches(&snap(DeviceKind::Wifi, "a", Some(-50))));
        assert!(!filter.matches(&snap(DeviceKind::Wifi, "b", Some(-49))));
    }

    #[test]
    fn absent_reading_passes_both_bounds() {
        let filter = DeviceFilter {
            min_signal: Some(-70),
            max_signal: Some(-40),
            ..DeviceFilter::default()
        };
        assert!(filter.matches(&snap(DeviceKind::Wifi, "quiet", None)));
    }

    #[test]
    fn query_searches_name_mac_and_vendor() {
        let target = snap(DeviceKind::Wifi, "Home", Some(-45));
        for q in ["home", "HOME", "bb:cc", "acme"] {
            let filter = DeviceFilter {
                query: q.to_owned(),
                ..DeviceFilter::default()
            };
            assert!(filter.matches(&target), "query {q:?} should match");
        }
        let filter = DeviceFilter {
            query: "office".to_owned(),
            ..DeviceFilter::default()
        };
        assert!(!filter.matches(&target));
    }

    #[test]
    fn query_tolerates_absent_fields() {
        let mut target = snap(DeviceKind::Ble, "", None);
        target.name = None;
        target.vendor = None;
        let filter = DeviceFilter {
            query: "ff".to_owned(),
            ..DeviceFilter::default()
        };
        assert!(filter.matches(&target), "mac still participates");
    }
}
