//! Color palette and style constants for the upload TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(102, 126, 234);
pub const C_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_BUSY: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_DROP_BORDER: Color = Color::Rgb(102, 126, 234);
pub const C_DROP_HIGHLIGHT: Color = Color::Rgb(118, 75, 162); // hovered drop target
pub const C_DROP_HIGHLIGHT_BG: Color = Color::Rgb(30, 28, 44);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_BUTTON_BG: Color = Color::Rgb(102, 126, 234);
pub const C_BUTTON_DISABLED_BG: Color = Color::Rgb(52, 52, 70);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}

pub fn style_button(enabled: bool, focused: bool) -> Style {
    let style = if enabled {
        Style::default().fg(C_BG).bg(C_BUTTON_BG)
    } else {
        Style::default().fg(C_SECONDARY).bg(C_BUTTON_DISABLED_BG)
    };
    if focused && enabled {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
