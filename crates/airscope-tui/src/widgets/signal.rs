//! Signal strength formatting — numeric cell text, severity coloring,
//! and one-row sparklines built from eighth-block characters.

use ratatui::style::Style;
use ratatui::text::Span;

use airscope_core::{SignalBand, chart};

use crate::theme;

/// Eighth-block ramp indexed by [`chart::spark_levels`] output.
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Placeholder shown where a value is absent.
pub const EMPTY_CELL: &str = "─";

/// Styled numeric signal cell: "-45 dBm" colored by severity band,
/// or a dim placeholder when no reading exists.
pub fn signal_span(dbm: Option<i32>) -> Span<'static> {
    let Some(dbm) = dbm else {
        return Span::styled(EMPTY_CELL.to_string(), Style::default().fg(theme::BORDER_GRAY));
    };
    let color = theme::band_color(SignalBand::of(dbm));
    Span::styled(format!("{dbm} dBm"), Style::default().fg(color))
}

/// Compact history sparkline for a table cell, `width` characters wide.
///
/// Heights come from the shared chart scale, so a -90 dBm device's bars
/// sit visibly lower than a -45 dBm one regardless of their own ranges.
/// Empty history renders as a neutral placeholder.
pub fn sparkline(history: &[i32], width: usize, latest_color_dbm: Option<i32>) -> Span<'static> {
    if history.is_empty() || width == 0 {
        return Span::styled(
            EMPTY_CELL.repeat(width.max(1)),
            Style::default().fg(theme::BORDER_GRAY),
        );
    }
    let bars: String = chart::spark_levels(history, width)
        .into_iter()
        .map(|level| BLOCKS[usize::from(level.min(7))])
        .collect();
    let color = latest_color_dbm
        .or_else(|| history.last().copied())
        .map_or(theme::DIM_WHITE, |dbm| theme::band_color(SignalBand::of(dbm)));
    Span::styled(bars, Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_reading_has_no_band() {
        let span = signal_span(None);
        assert_eq!(span.content, EMPTY_CELL);
    }

    #[test]
    fn reading_carries_unit_text() {
        let span = signal_span(Some(-45));
        assert_eq!(span.content, "-45 dBm");
    }

    #[test]
    fn sparkline_empty_is_placeholder() {
        let span = sparkline(&[], 5, None);
        assert_eq!(span.content, EMPTY_CELL.repeat(5));
    }

    #[test]
    fn sparkline_width_matches_history() {
        let span = sparkline(&[-90, -60, -45], 16, None);
        assert_eq!(span.content.chars().count(), 3, "short history, one bar per sample");
        let span = sparkline(&(0..40).map(|i| -90 + i).collect::<Vec<_>>(), 16, None);
        assert_eq!(span.content.chars().count(), 16, "long history resampled to width");
    }

    #[test]
    fn sparkline_pins_to_shared_scale() {
        let floor = sparkline(&[-110], 1, None);
        let bottom = sparkline(&[-100], 1, None);
        assert_eq!(floor.content, bottom.content);
        let ceil = sparkline(&[-20], 1, None);
        let top = sparkline(&[-30], 1, None);
        assert_eq!(ceil.content, top.content);
    }
}
