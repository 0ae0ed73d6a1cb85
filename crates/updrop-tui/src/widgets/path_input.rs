//! PathInput: the picker: a tui-input line where a file path is typed.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_input, C_INPUT_BG, C_MUTED, C_SECONDARY};

const PROMPT: &str = "path › ";

pub enum PathAction {
    /// Enter: the typed path is the new selection (may be empty).
    Committed(String),
    /// Esc on a non-empty line: text cleared.
    Cleared,
    /// Esc on an empty line.
    Cancelled,
    Edited,
}

pub struct PathInput {
    input: Input,
    placeholder: String,
}

impl PathInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PathAction {
        match key.code {
            KeyCode::Enter => PathAction::Committed(self.input.value().to_string()),
            KeyCode::Esc => {
                if self.input.value().is_empty() {
                    PathAction::Cancelled
                } else {
                    self.clear();
                    PathAction::Cleared
                }
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                PathAction::Edited
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let prompt_w = PROMPT.chars().count();
        let scroll = self
            .input
            .visual_scroll((area.width as usize).saturating_sub(prompt_w + 1));
        let value = self.input.value();

        let prompt = Span::styled(PROMPT, Style::default().fg(C_SECONDARY));
        let body = if value.is_empty() {
            Span::styled(self.placeholder.clone(), Style::default().fg(C_MUTED))
        } else {
            Span::styled(value.chars().skip(scroll).collect::<String>(), style_input())
        };

        let paragraph =
            Paragraph::new(Line::from(vec![prompt, body])).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, area);

        if focused {
            let cursor_x = area.x + (prompt_w + self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}
