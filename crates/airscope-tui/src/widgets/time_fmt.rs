//! Last-seen timestamp formatting: a compact relative form for table
//! rows and the precise RFC 3339 form for the detail panel.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::widgets::signal::EMPTY_CELL;

/// Compact relative form: "3s ago", "5m ago", "2h ago".
///
/// Sub-second freshness rounds up to "1s ago" — the table refreshes every
/// couple of seconds, so "0s" would just flicker.
pub fn fmt_relative(last_seen: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = last_seen else {
        return EMPTY_CELL.to_owned();
    };
    let secs = now.signed_duration_since(ts).num_seconds().max(1);
    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    let rounded = coarse(Duration::from_secs(secs as u64));
    format!("{} ago", humantime::format_duration(rounded))
}

/// Precise machine-readable form for the detail panel.
pub fn fmt_precise(last_seen: Option<DateTime<Utc>>) -> String {
    last_seen.map_or_else(
        || EMPTY_CELL.to_owned(),
        |ts| ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}

/// Truncate to the largest single unit so humantime prints "2h" instead
/// of "2h 13m 7s".
fn coarse(d: Duration) -> Duration {
    let secs = d.as_secs();
    let unit = if secs >= 86_400 {
        86_400
    } else if secs >= 3_600 {
        3_600
    } else if secs >= 60 {
        60
    } else {
        1
    };
    Duration::from_secs((secs / unit) * unit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(epoch: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(epoch, 0).unwrap()
    }

    #[test]
    fn relative_forms() {
        let now = at(1_700_000_100);
        assert_eq!(fmt_relative(Some(at(1_700_000_097)), now), "3s ago");
        assert_eq!(fmt_relative(Some(at(1_700_000_100)), now), "1s ago");
        assert_eq!(fmt_relative(Some(at(1_699_999_800)), now), "5m ago");
        assert_eq!(fmt_relative(Some(at(1_699_992_900)), now), "2h ago");
        assert_eq!(fmt_relative(None, now), EMPTY_CELL);
    }

    #[test]
    fn precise_is_rfc3339() {
        assert_eq!(
            fmt_precise(Some(at(1_700_000_000))),
            "2023-11-14T22:13:20Z"
        );
        assert_eq!(fmt_precise(None), EMPTY_CELL);
    }
}
