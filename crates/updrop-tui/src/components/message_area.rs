//! MessageArea: one status line under the form.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    app_state::FormState,
    component::Component,
    surface::MessageKind,
    theme::{C_ERROR, C_SUCCESS},
};

pub struct MessageArea;

impl MessageArea {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MessageArea {
    fn default() -> Self {
        Self::new()
    }
}

fn message_line(text: &str, kind: MessageKind) -> Line<'_> {
    let (icon, color) = match kind {
        MessageKind::Success => ("✓", C_SUCCESS),
        MessageKind::Error => ("✗", C_ERROR),
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", icon),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(text, Style::default().fg(color)),
    ])
}

impl Component for MessageArea {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &FormState) {
        let Some(msg) = &state.message else {
            return;
        };
        frame.render_widget(
            Paragraph::new(message_line(&msg.text, msg.kind)).wrap(Wrap { trim: true }),
            area,
        );
    }

    /// Always reserve the row so the layout doesn't jump when a message
    /// appears or expires.
    fn height(&self, _state: &FormState) -> u16 {
        1
    }
}
