//! Status bar: bottom line with form mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_BUSY, C_MUTED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    /// Typing into the path input.
    Path,
    /// Focus on the submit control.
    Button,
    /// A request is in flight.
    Busy,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Path => "PATH",
            Self::Button => "UPLOAD",
            Self::Busy => "BUSY",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Path | Self::Button => C_ACCENT,
            Self::Busy => C_BUSY,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Path => " type a path  Enter select  Tab button  Ctrl+U upload  drop a file here  Esc clear/quit  Ctrl+C quit",
            Self::Button => " Enter upload  Tab path  Ctrl+U upload  drop a file here  Esc/q quit",
            Self::Busy => " uploading…  Ctrl+C quit",
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
