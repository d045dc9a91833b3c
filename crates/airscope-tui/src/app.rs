//! Application core — event loop, action dispatch, overlays.
//!
//! All mutable UI state is owned here or by the devices screen, and every
//! mutation travels through the action channel, drained on the single
//! event loop. Rapid-fire filter input (typing, bound adjustments) is
//! coalesced by the [`Debouncer`]: config updates land immediately, the
//! expensive view recompute fires once per quiet period.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use airscope_core::{Monitor, RefreshStatus};

use crate::action::Action;
use crate::component::Component;
use crate::debounce::{Debouncer, FILTER_DEBOUNCE};
use crate::event::{Event, EventReader};
use crate::screens::devices::DevicesScreen;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// The single screen — the live device table.
    devices_screen: DevicesScreen,
    /// Whether the app should keep running.
    running: bool,
    /// Latest poll outcome, shown in the status bar.
    refresh_status: RefreshStatus,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility.
    search_active: bool,
    /// Current search query being typed.
    search_query: String,
    /// Coalesces filter input into one view recompute per quiet period.
    filter_debounce: Debouncer,
    /// Action sender — background tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Monitor for live data.
    monitor: Monitor,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(monitor: Monitor, masking: bool) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            devices_screen: DevicesScreen::new(masking),
            running: true,
            refresh_status: RefreshStatus::Pending,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            filter_debounce: Debouncer::new(FILTER_DEBOUNCE),
            action_tx,
            action_rx,
            monitor,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.devices_screen.init(self.action_tx.clone())?;
        self.devices_screen.set_focused(true);

        // Spawn the data bridge feeding snapshots into the action loop.
        {
            let monitor = self.monitor.clone();
            let tx = self.action_tx.clone();
            let cancel = self.data_cancel.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(monitor, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the data bridge (which stops the monitor) and clean up
        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else is delegated to the devices screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Search input captures everything except its own exit keys
        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseSearch)),
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::SHIFT | KeyModifiers::NONE, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            _ => {}
        }

        self.devices_screen.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.devices_screen.handle_mouse_event(mouse)
    }

    /// Process a single action — update app state and propagate.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render | Action::Tick | Action::Resize(..) => {}

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.filter_debounce.cancel();
                self.forward(action)?;
            }

            Action::SearchSubmit => {
                self.search_active = false;
                self.filter_debounce.cancel();
                self.forward(&Action::CommitView)?;
            }

            // Rapid-fire filter input: config lands now, the recompute is
            // debounced so only the last event in a burst pays for it.
            Action::SearchInput(_)
            | Action::AdjustMinSignal(_)
            | Action::AdjustMaxSignal(_) => {
                self.forward(action)?;
                self.filter_debounce
                    .schedule(&self.action_tx, Action::CommitView);
            }

            Action::RefreshStatusChanged(status) => {
                debug!(?status, "refresh status");
                self.refresh_status = status.clone();
            }

            // Everything else belongs to the devices screen.
            other => self.forward(other)?,
        }

        Ok(())
    }

    /// Forward an action to the devices screen, dispatching any follow-up.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.devices_screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Devices screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.devices_screen.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Bottom status bar: search input, or refresh indicator + key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::MAGENTA)),
                Span::styled(&self.search_query, Style::default().fg(theme::CYAN)),
                Span::styled("█", Style::default().fg(theme::CYAN)),
                Span::styled("  Esc cancel  Enter submit", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let indicator = match &self.refresh_status {
            RefreshStatus::Ok(ts) => Span::styled(
                format!(
                    "● refreshed {}",
                    ts.with_timezone(&chrono::Local).format("%H:%M:%S")
                ),
                Style::default().fg(theme::GREEN),
            ),
            RefreshStatus::Failed(msg) => Span::styled(
                format!("○ refresh failed: {msg}"),
                Style::default().fg(theme::RED),
            ),
            RefreshStatus::Pending => Span::styled(
                "◐ waiting for first snapshot",
                Style::default().fg(theme::AMBER),
            ),
        };

        let hints = Span::styled("  │ ? help  / search  q quit", theme::key_hint());
        let line = Line::from(vec![Span::raw(" "), indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 18u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let key = theme::key_hint_key;
        let hint = theme::key_hint;
        let help_text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  j/k ↑/↓   ", key()),
                Span::styled("Move selection", hint()),
            ]),
            Line::from(vec![
                Span::styled("  g/G       ", key()),
                Span::styled("Top / bottom", hint()),
            ]),
            Line::from(vec![
                Span::styled("  Enter     ", key()),
                Span::styled("Device detail + chart", hint()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  /         ", key()),
                Span::styled("Search name / address / vendor", hint()),
            ]),
            Line::from(vec![
                Span::styled("  Tab       ", key()),
                Span::styled("Cycle type filter (all/wifi/ble)", hint()),
            ]),
            Line::from(vec![
                Span::styled("  t n a s e ", key()),
                Span::styled("Sort column (click headers too)", hint()),
            ]),
            Line::from(vec![
                Span::styled("  [ ] { }   ", key()),
                Span::styled("Signal bounds, \\ clears", hint()),
            ]),
            Line::from(vec![
                Span::styled("  m         ", key()),
                Span::styled("Toggle MAC masking", hint()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  q         ", key()),
                Span::styled("Quit", hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled("               Esc or ? to close", hint())),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
