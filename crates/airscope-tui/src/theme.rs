//! Aurora palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use airscope_core::SignalBand;

// ── Core Palette ──────────────────────────────────────────────────────

pub const MAGENTA: Color = Color::Rgb(209, 109, 255); // #d16dff
pub const CYAN: Color = Color::Rgb(125, 249, 228); // #7df9e4
pub const AMBER: Color = Color::Rgb(243, 249, 157); // #f3f99d
pub const GREEN: Color = Color::Rgb(90, 247, 142); // #5af78e
pub const RED: Color = Color::Rgb(255, 92, 87); // #ff5c57
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(195, 199, 209); // #c3c7d1
pub const BORDER_GRAY: Color = Color::Rgb(90, 106, 156); // #5a6a9c
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 44, 58); // #2a2c3a
pub const BG_DARK: Color = Color::Rgb(27, 28, 38); // #1b1c26

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(MAGENTA)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Active sort column header.
pub fn table_header_active() -> Style {
    Style::default()
        .fg(MAGENTA)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected table row background.
pub fn table_selected() -> Style {
    Style::default().bg(BG_HIGHLIGHT)
}

/// Active filter tab.
pub fn tab_active() -> Style {
    Style::default().fg(MAGENTA).add_modifier(Modifier::BOLD)
}

/// Inactive filter tab.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Color for a signal severity band.
pub fn band_color(band: SignalBand) -> Color {
    match band {
        SignalBand::Excellent => GREEN,
        SignalBand::Good => CYAN,
        SignalBand::Fair => AMBER,
        SignalBand::Weak => RED,
    }
}
