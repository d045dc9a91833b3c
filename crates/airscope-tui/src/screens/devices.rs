//! Devices screen — the live device table.
//!
//! Owns the canonical snapshot list copy and the view configuration, and
//! derives the presented row set from scratch on every refresh or config
//! change. Sorting is reachable from the keyboard and by clicking column
//! headers; the selected device opens a detail panel with the full
//! signal-history chart.

use std::cell::Cell;
use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell as TableCell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use airscope_core::{
    DeviceKind, DeviceSnapshot, KindCounts, SortKey, ViewConfig, mask::mask_mac,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{signal, signal_chart, time_fmt};

/// Width of the per-row history sparkline, in cells.
const SPARK_WIDTH: usize = 14;

/// Step for the signal-bound adjustment keys, in dBm.
pub const BOUND_STEP: i32 = 5;

/// Table columns in render order. `History` is display-only.
const COLUMNS: [Column; 7] = [
    Column::Kind,
    Column::Name,
    Column::Mac,
    Column::Vendor,
    Column::Signal,
    Column::History,
    Column::LastSeen,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Kind,
    Name,
    Mac,
    Vendor,
    Signal,
    History,
    LastSeen,
}

impl Column {
    fn constraint(self) -> Constraint {
        match self {
            Self::Kind => Constraint::Length(5),
            Self::Name | Self::Vendor => Constraint::Fill(2),
            Self::Mac => Constraint::Length(18),
            Self::Signal => Constraint::Length(8),
            #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
            Self::History => Constraint::Length(SPARK_WIDTH as u16),
            Self::LastSeen => Constraint::Length(8),
        }
    }

    /// The sort key this column drives, if any.
    fn sort_key(self) -> Option<SortKey> {
        match self {
            Self::Kind => Some(SortKey::Kind),
            Self::Name => Some(SortKey::Name),
            Self::Mac => Some(SortKey::Mac),
            Self::Signal => Some(SortKey::Signal),
            Self::LastSeen => Some(SortKey::LastSeen),
            Self::Vendor | Self::History => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Name => "Name",
            Self::Mac => "Address",
            Self::Vendor => "Vendor",
            Self::Signal => "Signal",
            Self::History => "History",
            Self::LastSeen => "Seen",
        }
    }
}

/// Geometry captured at render time for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct TableLayout {
    table: Rect,
    header_y: u16,
    rows_top: u16,
}

pub struct DevicesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    /// Canonical list — replaced wholesale on every poll.
    devices: Arc<Vec<Arc<DeviceSnapshot>>>,
    /// Per-kind totals over the canonical (unfiltered) list.
    counts: KindCounts,
    config: ViewConfig,
    /// Derived view: filtered, then stable-sorted.
    view: Vec<Arc<DeviceSnapshot>>,
    table_state: TableState,
    detail_open: bool,
    layout: Cell<TableLayout>,
}

impl DevicesScreen {
    pub fn new(masking: bool) -> Self {
        Self {
            focused: false,
            action_tx: None,
            devices: Arc::new(Vec::new()),
            counts: KindCounts::default(),
            config: ViewConfig {
                masking,
                ..ViewConfig::default()
            },
            view: Vec::new(),
            table_state: TableState::default(),
            detail_open: false,
            layout: Cell::new(TableLayout::default()),
        }
    }

    /// Re-derive the presented list from the canonical list and current
    /// config. Full recomputation — device counts are tens, not thousands.
    fn recompute_view(&mut self) {
        self.view = self.config.apply(&self.devices);
        let len = self.view.len();
        if len == 0 {
            self.table_state.select(None);
        } else if self.selected_index() >= len {
            self.table_state.select(Some(len - 1));
        } else if self.table_state.selected().is_none() {
            self.table_state.select(Some(0));
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_device(&self) -> Option<&Arc<DeviceSnapshot>> {
        self.view.get(self.selected_index())
    }

    fn select(&mut self, idx: usize) {
        if self.view.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(self.view.len() - 1)));
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, self.view.len() as isize - 1);
        self.select(next as usize);
    }

    /// Resolve per-column rects for the header row, matching the table's
    /// own constraint solve (column spacing 1).
    fn header_cells(&self) -> Vec<(Column, Rect)> {
        let layout = self.layout.get();
        let header_area = Rect::new(layout.table.x, layout.header_y, layout.table.width, 1);
        let rects = Layout::horizontal(COLUMNS.map(Column::constraint))
            .spacing(1)
            .split(header_area);
        COLUMNS.iter().copied().zip(rects.iter().copied()).collect()
    }

    // ── Render helpers ───────────────────────────────────────────────

    fn header_row(&self) -> Row<'static> {
        let cells: Vec<TableCell<'static>> = COLUMNS
            .iter()
            .map(|&col| {
                let Some(key) = col.sort_key() else {
                    return TableCell::from(col.label()).style(theme::table_header());
                };
                if key == self.config.sort.key {
                    let text = format!("{} {}", col.label(), self.config.sort.direction.arrow());
                    TableCell::from(text).style(theme::table_header_active())
                } else {
                    TableCell::from(col.label()).style(theme::table_header())
                }
            })
            .collect();
        Row::new(cells)
    }

    fn device_row(&self, device: &DeviceSnapshot, now: chrono::DateTime<Utc>) -> Row<'static> {
        let (kind_text, kind_color) = match device.kind {
            DeviceKind::Wifi => ("wifi", theme::CYAN),
            DeviceKind::Ble => ("ble", theme::MAGENTA),
        };

        let name = device.display_name().to_owned();
        let name_style = if device.name.is_some() {
            Style::default().fg(theme::CYAN)
        } else {
            Style::default().fg(theme::BORDER_GRAY)
        };

        let vendor = device.display_vendor().to_owned();
        let vendor_style = if device.vendor.is_some() {
            Style::default().fg(theme::DIM_WHITE)
        } else {
            Style::default().fg(theme::BORDER_GRAY)
        };

        Row::new(vec![
            TableCell::from(kind_text).style(Style::default().fg(kind_color)),
            TableCell::from(name).style(name_style),
            TableCell::from(mask_mac(&device.mac, self.config.masking))
                .style(Style::default().fg(theme::DIM_WHITE)),
            TableCell::from(vendor).style(vendor_style),
            TableCell::from(Line::from(signal::signal_span(device.signal_dbm))),
            TableCell::from(Line::from(signal::sparkline(
                &device.history,
                SPARK_WIDTH,
                device.signal_dbm,
            ))),
            TableCell::from(time_fmt::fmt_relative(device.last_seen, now))
                .style(Style::default().fg(theme::DIM_WHITE)),
        ])
        .style(theme::table_row())
    }

    fn filter_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for kind in [
            airscope_core::KindFilter::All,
            airscope_core::KindFilter::Wifi,
            airscope_core::KindFilter::Ble,
        ] {
            let style = if kind == self.config.filter.kind {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} ", kind.label()), style));
        }

        spans.push(Span::styled("  │ ", theme::key_hint()));
        spans.push(Span::styled(
            if self.config.masking { "mask on" } else { "mask off" },
            Style::default().fg(if self.config.masking {
                theme::GREEN
            } else {
                theme::AMBER
            }),
        ));

        let bounds = match (self.config.filter.min_signal, self.config.filter.max_signal) {
            (None, None) => String::new(),
            (min, max) => format!(
                "  │ bounds {} … {}",
                min.map_or_else(|| "·".into(), |v| format!("{v}")),
                max.map_or_else(|| "·".into(), |v| format!("{v}")),
            ),
        };
        if !bounds.is_empty() {
            spans.push(Span::styled(bounds, Style::default().fg(theme::AMBER)));
        }

        if !self.config.filter.query.is_empty() {
            spans.push(Span::styled(
                format!("  │ \"{}\"", self.config.filter.query),
                Style::default().fg(theme::CYAN),
            ));
        }

        Line::from(spans)
    }

    #[allow(clippy::too_many_lines)]
    fn render_detail(&self, frame: &mut Frame, area: Rect, device: &DeviceSnapshot) {
        let title = format!(" {} ", device.display_name());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let halves =
            Layout::horizontal([Constraint::Length(42), Constraint::Min(20)]).split(inner);

        let field = |label: &str, value: String, color| {
            Line::from(vec![
                Span::styled(format!("  {label:<10}"), Style::default().fg(theme::BORDER_GRAY)),
                Span::styled(value, Style::default().fg(color)),
            ])
        };

        let lines = vec![
            Line::from(""),
            field("Type", device.kind.to_string(), theme::CYAN),
            field(
                "Address",
                mask_mac(&device.mac, self.config.masking),
                theme::DIM_WHITE,
            ),
            field("Vendor", device.display_vendor().to_owned(), theme::DIM_WHITE),
            Line::from(vec![
                Span::styled("  Signal    ", Style::default().fg(theme::BORDER_GRAY)),
                signal::signal_span(device.signal_dbm),
            ]),
            field(
                "Samples",
                device.history.len().to_string(),
                theme::DIM_WHITE,
            ),
            field("Seen", time_fmt::fmt_precise(device.last_seen), theme::CORAL),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), halves[0]);

        signal_chart::render(frame, halves[1], &device.history, "Signal history");
    }
}

impl Component for DevicesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open && key.code == KeyCode::Esc {
            return Ok(Some(Action::CloseDetail));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_selection(1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_selection(-1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.select(0);
                Ok(None)
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                let len = self.view.len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                self.move_selection(10);
                Ok(None)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.move_selection(-10);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if self.selected_device().is_some() {
                    Ok(Some(Action::OpenDetail))
                } else {
                    Ok(None)
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => Ok(Some(Action::CycleKindFilter)),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Ok(Some(Action::ToggleMasking)),

            // Sort columns: t/n/a/s/e
            (KeyModifiers::NONE, KeyCode::Char('t')) => Ok(Some(Action::SortColumn(SortKey::Kind))),
            (KeyModifiers::NONE, KeyCode::Char('n')) => Ok(Some(Action::SortColumn(SortKey::Name))),
            (KeyModifiers::NONE, KeyCode::Char('a')) => Ok(Some(Action::SortColumn(SortKey::Mac))),
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                Ok(Some(Action::SortColumn(SortKey::Signal)))
            }
            (KeyModifiers::NONE, KeyCode::Char('e')) => {
                Ok(Some(Action::SortColumn(SortKey::LastSeen)))
            }

            // Signal bounds, 5 dBm steps; rapid-fire friendly (debounced upstream)
            (KeyModifiers::NONE, KeyCode::Char('[')) => {
                Ok(Some(Action::AdjustMinSignal(-BOUND_STEP)))
            }
            (KeyModifiers::NONE, KeyCode::Char(']')) => {
                Ok(Some(Action::AdjustMinSignal(BOUND_STEP)))
            }
            (KeyModifiers::SHIFT, KeyCode::Char('{')) => {
                Ok(Some(Action::AdjustMaxSignal(-BOUND_STEP)))
            }
            (KeyModifiers::SHIFT, KeyCode::Char('}')) => {
                Ok(Some(Action::AdjustMaxSignal(BOUND_STEP)))
            }
            (KeyModifiers::NONE, KeyCode::Char('\\')) => Ok(Some(Action::ClearSignalBounds)),

            _ => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let layout = self.layout.get();

        // Header click: select/toggle that sort column.
        if mouse.row == layout.header_y {
            for (col, rect) in self.header_cells() {
                if mouse.column >= rect.x && mouse.column < rect.x + rect.width {
                    if let Some(key) = col.sort_key() {
                        return Ok(Some(Action::SortColumn(key)));
                    }
                    return Ok(None);
                }
            }
            return Ok(None);
        }

        // Row click: move the selection.
        let bottom = layout.table.y + layout.table.height;
        if mouse.row >= layout.rows_top && mouse.row < bottom {
            let idx = self.table_state.offset() + usize::from(mouse.row - layout.rows_top);
            if idx < self.view.len() {
                self.select(idx);
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesUpdated(devices) => {
                self.devices = Arc::clone(devices);
                self.counts = KindCounts::of(&self.devices);
                self.recompute_view();
            }

            // Query text lands immediately; the view recomputes when the
            // debounced CommitView arrives.
            Action::SearchInput(query) => {
                self.config.filter.query.clone_from(query);
            }
            Action::CommitView => {
                self.recompute_view();
            }
            Action::CloseSearch => {
                self.config.filter.query.clear();
                self.recompute_view();
            }

            Action::CycleKindFilter => {
                self.config.filter.kind = self.config.filter.kind.next();
                self.recompute_view();
                self.select(0);
            }
            Action::SortColumn(key) => {
                self.config.sort.select(*key);
                self.recompute_view();
            }
            Action::AdjustMinSignal(delta) => {
                let current = self.config.filter.min_signal.unwrap_or(-100);
                self.config.filter.min_signal = Some((current + delta).clamp(-100, 0));
            }
            Action::AdjustMaxSignal(delta) => {
                let current = self.config.filter.max_signal.unwrap_or(-30);
                self.config.filter.max_signal = Some((current + delta).clamp(-100, 0));
            }
            Action::ClearSignalBounds => {
                self.config.filter.min_signal = None;
                self.config.filter.max_signal = None;
                self.recompute_view();
            }
            Action::ToggleMasking => {
                self.config.masking = !self.config.masking;
            }

            Action::OpenDetail => {
                self.detail_open = true;
            }
            Action::CloseDetail => {
                self.detail_open = false;
            }

            _ => {}
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let shown = self.view.len();
        let total = self.devices.len();
        let title = format!(
            " Devices {shown}/{total} · wifi {} · ble {} ",
            self.counts.wifi, self.counts.ble,
        );

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Split for table + optional detail panel
        let (table_area, detail_area) = if self.detail_open {
            let chunks =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let sections = Layout::vertical([
            Constraint::Length(1), // filter tabs
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(table_area);

        frame.render_widget(Paragraph::new(self.filter_line()), sections[0]);

        // Capture geometry for mouse hit-testing before the table renders.
        self.layout.set(TableLayout {
            table: sections[1],
            header_y: sections[1].y,
            rows_top: sections[1].y + 1,
        });

        let now = Utc::now();
        let rows: Vec<Row> = self.view.iter().map(|d| self.device_row(d, now)).collect();

        let table = Table::new(rows, COLUMNS.map(Column::constraint))
            .header(self.header_row())
            .row_highlight_style(theme::table_selected().add_modifier(Modifier::BOLD));

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, sections[1], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("type  ", theme::key_hint()),
            Span::styled("t/n/a/s/e ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("[/] {/} ", theme::key_hint_key()),
            Span::styled("bounds  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled("mask  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), sections[2]);

        if let Some(detail_area) = detail_area {
            if let Some(device) = self.selected_device() {
                self.render_detail(frame, detail_area, device);
            }
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use airscope_core::MacAddress;
    use pretty_assertions::assert_eq;

    fn snap(kind: DeviceKind, name: &str, signal: Option<i32>) -> Arc<DeviceSnapshot> {
        Arc::new(DeviceSnapshot {
            kind,
            name: Some(name.to_owned()),
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff"),
            vendor: None,
            signal_dbm: signal,
            history: vec![-60, -55],
            last_seen: None,
        })
    }

    fn screen_with_devices() -> DevicesScreen {
        let mut screen = DevicesScreen::new(true);
        let devices = Arc::new(vec![
            snap(DeviceKind::Wifi, "Home", Some(-45)),
            snap(DeviceKind::Ble, "Tag", Some(-82)),
        ]);
        screen.update(&Action::DevicesUpdated(devices)).unwrap();
        screen
    }

    #[test]
    fn devices_update_recomputes_counts_and_view() {
        let screen = screen_with_devices();
        assert_eq!(screen.counts, KindCounts { wifi: 1, ble: 1 });
        assert_eq!(screen.view.len(), 2);
    }

    #[test]
    fn search_input_defers_until_commit() {
        let mut screen = screen_with_devices();
        screen
            .update(&Action::SearchInput("home".into()))
            .unwrap();
        assert_eq!(screen.view.len(), 2, "view untouched before commit");

        screen.update(&Action::CommitView).unwrap();
        assert_eq!(screen.view.len(), 1);
        assert_eq!(screen.view[0].display_name(), "Home");

        // Counts still reflect the unfiltered canonical list.
        assert_eq!(screen.counts, KindCounts { wifi: 1, ble: 1 });
    }

    #[test]
    fn kind_cycle_applies_immediately() {
        let mut screen = screen_with_devices();
        screen.update(&Action::CycleKindFilter).unwrap();
        assert_eq!(screen.view.len(), 1);
        assert_eq!(screen.view[0].kind, DeviceKind::Wifi);
    }

    #[test]
    fn sort_column_switches_and_toggles() {
        let mut screen = screen_with_devices();
        screen
            .update(&Action::SortColumn(SortKey::Signal))
            .unwrap();
        let names: Vec<_> = screen.view.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["Home", "Tag"], "signal defaults to descending");

        screen
            .update(&Action::SortColumn(SortKey::Signal))
            .unwrap();
        let names: Vec<_> = screen.view.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["Tag", "Home"], "re-select toggles direction");
    }

    #[test]
    fn bound_adjustments_wait_for_commit() {
        let mut screen = screen_with_devices();
        screen.update(&Action::AdjustMinSignal(BOUND_STEP * 6)).unwrap();
        assert_eq!(screen.config.filter.min_signal, Some(-70));
        assert_eq!(screen.view.len(), 2);

        screen.update(&Action::CommitView).unwrap();
        assert_eq!(screen.view.len(), 1, "-82 device filtered out");

        screen.update(&Action::ClearSignalBounds).unwrap();
        assert_eq!(screen.view.len(), 2);
    }

    #[test]
    fn selection_clamps_after_shrink() {
        let mut screen = screen_with_devices();
        screen.select(1);
        let devices = Arc::new(vec![snap(DeviceKind::Wifi, "Home", Some(-45))]);
        screen.update(&Action::DevicesUpdated(devices)).unwrap();
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn masking_toggle_flows_to_rows() {
        let mut screen = screen_with_devices();
        assert!(screen.config.masking);
        screen.update(&Action::ToggleMasking).unwrap();
        assert!(!screen.config.masking);
    }
}
