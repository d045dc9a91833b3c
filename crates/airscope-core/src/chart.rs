// ── Signal-history chart geometry ──
//
// Pure coordinate mapping; drawing lives in the TUI. The dBm scale is
// fixed at [-100, -30] for every device — charts are comparable across
// rows, never individually normalized. X positions are index-based:
// evenly spaced regardless of real time gaps between readings.

/// Bottom of the shared vertical scale. Readings at or below pin here.
pub const SIGNAL_FLOOR_DBM: f64 = -100.0;

/// Top of the shared vertical scale. Readings at or above pin here.
pub const SIGNAL_CEIL_DBM: f64 = -30.0;

/// Number of vertical levels an eighth-block sparkline cell can show.
const SPARK_LEVELS: u8 = 8;

/// Clamp a reading onto the shared scale.
pub fn clamp_dbm(dbm: i32) -> f64 {
    f64::from(dbm).clamp(SIGNAL_FLOOR_DBM, SIGNAL_CEIL_DBM)
}

/// Position of a reading on the shared scale, 0.0 (floor) to 1.0 (ceiling).
pub fn normalized(dbm: i32) -> f64 {
    (clamp_dbm(dbm) - SIGNAL_FLOOR_DBM) / (SIGNAL_CEIL_DBM - SIGNAL_FLOOR_DBM)
}

/// Chart points for a history: `(index, clamped dBm)`, oldest first.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn series(history: &[i32]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, &dbm)| (i as f64, clamp_dbm(dbm)))
        .collect()
}

/// The most recent reading as a one-point dataset, for the marker drawn
/// on top of the polyline.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn latest_point(history: &[i32]) -> Option<(f64, f64)> {
    let last = *history.last()?;
    Some(((history.len() - 1) as f64, clamp_dbm(last)))
}

/// Horizontal bounds for a history of `len` readings.
///
/// A single reading gets centered bounds so its point lands at mid-width;
/// longer histories span the full surface edge to edge.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn x_bounds(len: usize) -> [f64; 2] {
    match len {
        0 | 1 => [-0.5, 0.5],
        n => [0.0, (n - 1) as f64],
    }
}

/// Vertical bounds — always the shared scale.
pub fn y_bounds() -> [f64; 2] {
    [SIGNAL_FLOOR_DBM, SIGNAL_CEIL_DBM]
}

/// Per-cell vertical levels (0..=7) for a row sparkline of `width` cells.
///
/// Histories longer than the width are resampled by even index spacing;
/// shorter histories use one cell per reading.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn spark_levels(history: &[i32], width: usize) -> Vec<u8> {
    if history.is_empty() || width == 0 {
        return Vec::new();
    }
    let n = history.len();
    let cells = width.min(n);
    (0..cells)
        .map(|i| {
            let idx = if cells == 1 {
                n - 1
            } else {
                (i as f64 * (n - 1) as f64 / (cells - 1) as f64).round() as usize
            };
            let level = (normalized(history[idx]) * f64::from(SPARK_LEVELS - 1)).round() as u8;
            level.min(SPARK_LEVELS - 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_extremes() {
        // Off-scale readings pin to the same extremes as the scale edges.
        assert_eq!(clamp_dbm(-20), clamp_dbm(-30));
        assert_eq!(clamp_dbm(-110), clamp_dbm(-100));
        assert_eq!(clamp_dbm(-65), -65.0);
    }

    #[test]
    fn normalized_spans_unit_interval() {
        assert_eq!(normalized(-100), 0.0);
        assert_eq!(normalized(-30), 1.0);
        assert_eq!(normalized(-110), 0.0);
        assert_eq!(normalized(-20), 1.0);
        let mid = normalized(-65);
        assert!((mid - 0.5).abs() < 1e-9);
    }

    #[test]
    fn single_reading_centers_at_mid_width() {
        let pts = series(&[-60]);
        assert_eq!(pts, vec![(0.0, -60.0)]);
        let [lo, hi] = x_bounds(1);
        assert!((lo + hi).abs() < 1e-9, "bounds centered on the point");
    }

    #[test]
    fn series_is_index_spaced() {
        let pts = series(&[-90, -80, -70]);
        assert_eq!(pts[0].0, 0.0);
        assert_eq!(pts[1].0, 1.0);
        assert_eq!(pts[2].0, 2.0);
        assert_eq!(x_bounds(3), [0.0, 2.0]);
    }

    #[test]
    fn latest_point_is_last_reading() {
        assert_eq!(latest_point(&[-90, -45]), Some((1.0, -45.0)));
        assert_eq!(latest_point(&[]), None);
    }

    #[test]
    fn spark_levels_pin_like_the_chart() {
        let levels = spark_levels(&[-110, -100, -30, -20], 4);
        assert_eq!(levels[0], levels[1], "-110 pins with -100");
        assert_eq!(levels[2], levels[3], "-20 pins with -30");
        assert_eq!(levels[1], 0);
        assert_eq!(levels[2], 7);
    }

    #[test]
    fn spark_levels_resample_long_histories() {
        let history: Vec<i32> = (0..60).map(|i| -100 + i).collect();
        let levels = spark_levels(&history, 20);
        assert_eq!(levels.len(), 20);
        assert!(levels.windows(2).all(|w| w[0] <= w[1]), "monotonic input stays monotonic");
    }

    #[test]
    fn spark_levels_empty_cases() {
        assert!(spark_levels(&[], 10).is_empty());
        assert!(spark_levels(&[-50], 0).is_empty());
        assert_eq!(spark_levels(&[-50], 10).len(), 1);
    }
}
