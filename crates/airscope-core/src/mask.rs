// ── MAC-address privacy masking ──
//
// Pure display transform: the canonical MacAddress is never mutated, and
// toggling re-derives from the raw string every time, so no information
// is ever destroyed. Pairs 4 and 5 carry the device-specific half of the
// address; pairs 1-3 identify the vendor and stay readable for triage.

use crate::model::MacAddress;

/// Replacement for a redacted pair.
const REDACTED_PAIR: &str = "••";

/// Character offsets blanked in the malformed-identifier fallback.
const FALLBACK_OFFSETS: std::ops::Range<usize> = 2..6;

/// Render an identifier for display, optionally masked.
///
/// Well-formed identifiers (six or more hex pairs) are re-joined with the
/// detected separator; with masking on, the 4th and 5th pairs become
/// [`REDACTED_PAIR`]. Identifiers with fewer than six pairs are returned
/// raw, or with four interior characters blanked as a last resort when
/// masking is on.
pub fn mask_mac(mac: &MacAddress, enabled: bool) -> String {
    let pairs = mac.hex_pairs();
    if pairs.len() < 6 {
        return if enabled {
            redact_interior(mac.as_str())
        } else {
            mac.as_str().to_owned()
        };
    }

    let sep = mac.separator().to_string();
    if !enabled {
        return pairs.join(&sep);
    }

    pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            if i == 3 || i == 4 {
                REDACTED_PAIR
            } else {
                pair.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(&sep)
}

/// Fallback heuristic for identifiers that don't parse as six pairs:
/// blank the characters at [`FALLBACK_OFFSETS`], leaving the ends intact.
fn redact_interior(raw: &str) -> String {
    raw.chars()
        .enumerate()
        .map(|(i, c)| if FALLBACK_OFFSETS.contains(&i) { '•' } else { c })
        .collect()
}
