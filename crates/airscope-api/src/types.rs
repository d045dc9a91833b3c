// Wire types for the snapshot endpoint
//
// These mirror the daemon's JSON exactly and stay deliberately loose:
// every field the daemon may omit is an Option or a defaulted container.
// Domain conversion (placeholders, timestamps) happens in airscope-core.

use serde::Deserialize;

/// Device class as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    Wifi,
    Ble,
}

/// One device as reported by the scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    /// "wifi" | "ble".
    #[serde(rename = "type")]
    pub kind: WireKind,
    /// Display label (SSID for Wi-Fi, advertised local name for BLE).
    /// May be absent or empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Identifier string; the stable join key. May be malformed.
    pub mac: String,
    /// Vendor resolved from the OUI database upstream.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Latest RSSI reading in dBm; absent means "no reading".
    #[serde(default)]
    pub signal_dbm: Option<i32>,
    /// Past RSSI readings, oldest first, pre-truncated upstream.
    #[serde(default)]
    pub history: Vec<i32>,
    /// Most recent observation as epoch seconds (authoritative).
    #[serde(default)]
    pub last_seen: Option<f64>,
    /// Same instant as an ISO-8601 string (informational).
    #[serde(default)]
    pub last_seen_iso: Option<String>,
}

/// Full snapshot payload.
///
/// A missing `devices` field means "nothing visible", not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub server_time: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let json = r#"{
            "devices": [{
                "type": "wifi",
                "name": "Home",
                "mac": "AA:BB:CC:DD:EE:FF",
                "vendor": "Acme",
                "signal_dbm": -45,
                "history": [-50, -48, -45],
                "last_seen": 1700000000.5,
                "last_seen_iso": "2023-11-14T22:13:20+00:00"
            }],
            "server_time": 1700000001.0
        }"#;
        let resp: DevicesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.devices.len(), 1);
        let d = &resp.devices[0];
        assert_eq!(d.kind, WireKind::Wifi);
        assert_eq!(d.signal_dbm, Some(-45));
        assert_eq!(d.history, vec![-50, -48, -45]);
    }

    #[test]
    fn missing_devices_field_is_empty_list() {
        let resp: DevicesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.devices.is_empty());
        assert!(resp.server_time.is_none());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{"devices": [{"type": "ble", "mac": "12-34-56-78-9A-BC"}]}"#;
        let resp: DevicesResponse = serde_json::from_str(json).unwrap();
        let d = &resp.devices[0];
        assert_eq!(d.kind, WireKind::Ble);
        assert!(d.name.is_none());
        assert!(d.vendor.is_none());
        assert!(d.signal_dbm.is_none());
        assert!(d.history.is_empty());
        assert!(d.last_seen.is_none());
    }

    #[test]
    fn unknown_kind_is_a_decode_error() {
        let json = r#"{"devices": [{"type": "zigbee", "mac": "x"}]}"#;
        assert!(serde_json::from_str::<DevicesResponse>(json).is_err());
    }
}
