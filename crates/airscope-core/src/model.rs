// ── Core domain types ──
//
// DeviceSnapshot is the unit everything else operates on: one
// currently-visible wireless device as of the latest poll. The MAC is the
// stable join key across polls; everything else may come and go.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Device class: Wi-Fi network or BLE peripheral.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceKind {
    Wifi,
    Ble,
}

/// Device identifier as reported by the scanner.
///
/// Kept verbatim — normalization and redaction are display concerns owned
/// by [`crate::mask`]. The raw string is the join key, so rewriting it here
/// would break chart identity across polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All 2-hex-digit groups in the identifier, scanned left to right.
    ///
    /// Separator-agnostic: `AA:BB`, `aa-bb`, and `aabb` all yield two
    /// pairs. A lone trailing hex digit is dropped, matching a global
    /// `[0-9a-f]{2}` scan.
    pub fn hex_pairs(&self) -> Vec<String> {
        let chars: Vec<char> = self.0.chars().collect();
        let mut pairs = Vec::with_capacity(6);
        let mut i = 0;
        while i + 1 < chars.len() {
            if chars[i].is_ascii_hexdigit() && chars[i + 1].is_ascii_hexdigit() {
                pairs.push(chars[i..=i + 1].iter().collect());
                i += 2;
            } else {
                i += 1;
            }
        }
        pairs
    }

    /// The separator to re-join pairs with: whichever of `:` / `-` appears
    /// in the raw string, defaulting to `:`.
    pub fn separator(&self) -> char {
        if self.0.contains(':') {
            ':'
        } else if self.0.contains('-') {
            '-'
        } else {
            ':'
        }
    }

    /// Whether the identifier parses as at least six hex pairs.
    pub fn is_well_formed(&self) -> bool {
        self.hex_pairs().len() >= 6
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// One currently-visible device, as of the latest poll.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSnapshot {
    pub kind: DeviceKind,
    /// Display label; `None` renders as `(unknown)`.
    pub name: Option<String>,
    /// Stable join key across polls.
    pub mac: MacAddress,
    /// Vendor resolved upstream from the OUI prefix.
    pub vendor: Option<String>,
    /// Latest RSSI reading; `None` means "no reading".
    pub signal_dbm: Option<i32>,
    /// Past readings, oldest first. Pre-truncated upstream — never
    /// truncated here.
    pub history: Vec<i32>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl DeviceSnapshot {
    /// Display name with the placeholder applied.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|s| !s.is_empty()).unwrap_or("(unknown)")
    }

    /// Vendor with the placeholder applied.
    pub fn display_vendor(&self) -> &str {
        self.vendor.as_deref().filter(|s| !s.is_empty()).unwrap_or("Unknown")
    }

    /// Whether there is anything to chart.
    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Qualitative signal strength band. Bounds are inclusive at the lower end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalBand {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl SignalBand {
    /// Band for a reading: ≥ −50 excellent, ≥ −60 good, ≥ −70 fair,
    /// else weak.
    pub fn of(dbm: i32) -> Self {
        if dbm >= -50 {
            Self::Excellent
        } else if dbm >= -60 {
            Self::Good
        } else if dbm >= -70 {
            Self::Fair
        } else {
            Self::Weak
        }
    }
}
