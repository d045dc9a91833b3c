//! Full-size signal history chart for the detail panel.
//!
//! Geometry comes from `airscope_core::chart`: fixed [-100, -30] dBm
//! vertical scale, index-based horizontal spacing, single readings
//! centered at mid-width. The polyline renders at Braille resolution
//! (2×4 dots per cell); the most recent reading gets a block marker
//! drawn on top.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use airscope_core::{SignalBand, chart};

use crate::theme;

/// Render the history chart into `area`.
pub fn render(frame: &mut Frame, area: Rect, history: &[i32], title: &str) {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    if history.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("  no signal history yet")
                .style(Style::default().fg(theme::BORDER_GRAY)),
            inner,
        );
        return;
    }

    let points = chart::series(history);
    let latest: Vec<(f64, f64)> = chart::latest_point(history).into_iter().collect();
    let latest_color = history
        .last()
        .map_or(theme::DIM_WHITE, |&dbm| theme::band_color(SignalBand::of(dbm)));

    let line = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::CYAN))
        .data(&points);

    // Most recent reading, highlighted on top of the line.
    let marker = Dataset::default()
        .marker(Marker::Block)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(latest_color))
        .data(&latest);

    let y_labels = vec![
        Span::styled("-100", Style::default().fg(theme::BORDER_GRAY)),
        Span::styled("-65", Style::default().fg(theme::BORDER_GRAY)),
        Span::styled("-30", Style::default().fg(theme::BORDER_GRAY)),
    ];

    let widget = Chart::new(vec![line, marker])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(chart::x_bounds(history.len()))
                .style(Style::default().fg(theme::BORDER_GRAY)),
        )
        .y_axis(
            Axis::default()
                .bounds(chart::y_bounds())
                .labels(y_labels)
                .style(Style::default().fg(theme::BORDER_GRAY)),
        );

    frame.render_widget(widget, area);
}
