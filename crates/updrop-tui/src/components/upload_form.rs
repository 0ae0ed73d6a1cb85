//! UploadForm component: drop target, picker line, and submit control.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    action::Action,
    app_state::FormState,
    component::Component,
    drop::parse_dropped_paths,
    theme::{
        style_button, style_default, style_muted, C_BUSY, C_DROP_BORDER, C_DROP_HIGHLIGHT,
        C_DROP_HIGHLIGHT_BG, C_SUCCESS,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        path_input::{PathAction, PathInput},
        status_bar::InputMode,
    },
};

pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Which control inside the form has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Path,
    Submit,
}

pub struct UploadForm {
    path_input: PathInput,
    field: FormField,
    /// Areas from the last draw, for mouse hit-testing.
    drop_area: Rect,
    button_area: Rect,
    /// Pointer currently over the drop target.
    hovering: bool,
    /// Last `FormState::reset_generation` applied to the path input.
    seen_reset: u64,
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            path_input: PathInput::new("type a path, or drop a file onto this window"),
            field: FormField::Path,
            drop_area: Rect::default(),
            button_area: Rect::default(),
            hovering: false,
            seen_reset: 0,
        }
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn set_path(&mut self, path: &str) {
        self.path_input.set_value(path);
    }

    pub fn input_mode(&self, state: &FormState) -> InputMode {
        if state.spinner_visible {
            InputMode::Busy
        } else {
            match self.field() {
                FormField::Path => InputMode::Path,
                FormField::Submit => InputMode::Button,
            }
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Path => FormField::Submit,
            FormField::Submit => FormField::Path,
        };
    }

    /// Apply a form reset the controller requested since the last call.
    fn sync_reset(&mut self, state: &FormState) {
        if state.reset_generation != self.seen_reset {
            self.seen_reset = state.reset_generation;
            self.path_input.clear();
            self.field = FormField::Path;
        }
    }

    fn draw_drop_target(&self, frame: &mut Frame, area: Rect, state: &FormState) {
        let (border, bg) = if state.drop_highlight {
            (C_DROP_HIGHLIGHT, Some(C_DROP_HIGHLIGHT_BG))
        } else if state.has_file {
            (C_SUCCESS, None)
        } else {
            (C_DROP_BORDER, None)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(" drop a file here ", style_muted()));
        if let Some(bg) = bg {
            block = block.style(Style::default().bg(bg));
        }

        let inner_w = area.width.saturating_sub(4) as usize;
        let (icon, label_style) = if state.has_file {
            ("● ", style_default().add_modifier(Modifier::BOLD))
        } else {
            ("+ ", style_muted())
        };
        let label = fit_width(&state.file_label, inner_w.saturating_sub(2));
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(icon, Style::default().fg(border)),
            Span::styled(label, label_style),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect, focused: bool, state: &FormState) {
        let button_focused = focused && self.field == FormField::Submit;
        let text = format!("[ {} ]", state.submit_text);
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                text,
                style_button(state.submit_enabled, button_focused),
            ),
        ];
        if state.spinner_visible {
            let frame_idx = state.spinner_frame % SPINNER_FRAMES.len();
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                SPINNER_FRAMES[frame_idx],
                Style::default().fg(C_BUSY),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UploadForm {
    fn handle_key(&mut self, key: KeyEvent, state: &FormState) -> Vec<Action> {
        self.sync_reset(state);
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.toggle_field();
            return vec![];
        }

        match self.field {
            FormField::Path => match self.path_input.handle_key(key) {
                PathAction::Committed(path) => {
                    self.field = FormField::Submit;
                    vec![Action::CommitPath(path)]
                }
                PathAction::Cancelled => vec![Action::Quit],
                PathAction::Cleared | PathAction::Edited => vec![],
            },
            FormField::Submit => match key.code {
                // A disabled control swallows the press.
                KeyCode::Enter | KeyCode::Char(' ') if state.submit_enabled => {
                    vec![Action::Submit]
                }
                KeyCode::Esc | KeyCode::Char('q') => vec![Action::Quit],
                _ => vec![],
            },
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, state: &FormState) -> Vec<Action> {
        let over_drop = hit(self.drop_area, event.column, event.row);
        let over_button = hit(self.button_area, event.column, event.row);

        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if over_drop && !self.hovering {
                    self.hovering = true;
                    vec![Action::DragEnter]
                } else if over_drop {
                    vec![Action::DragOver]
                } else if self.hovering {
                    self.hovering = false;
                    vec![Action::DragLeave]
                } else {
                    vec![]
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if over_button {
                    self.field = FormField::Submit;
                    if state.submit_enabled {
                        return vec![Action::Submit];
                    }
                } else if over_drop {
                    self.field = FormField::Path;
                }
                vec![]
            }
            _ => vec![],
        }
    }

    /// A paste is how terminals deliver dropped files. It always goes to the
    /// drop target and never into the path input.
    fn handle_paste(&mut self, text: &str, _state: &FormState) -> Vec<Action> {
        self.hovering = false;
        vec![Action::Drop(parse_dropped_paths(text))]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &FormState) {
        self.sync_reset(state);

        let badge = if state.spinner_visible {
            Some(Badge {
                text: "BUSY",
                color: C_BUSY,
            })
        } else if state.has_file {
            Some(Badge {
                text: "READY",
                color: C_SUCCESS,
            })
        } else {
            None
        };
        let block = pane_chrome("Upload", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        self.drop_area = rows[0];
        self.draw_drop_target(frame, rows[0], state);

        self.path_input
            .draw(frame, rows[1], focused && self.field == FormField::Path);

        let button_w = (state.submit_text.width() as u16 + 5).min(rows[2].width);
        self.button_area = Rect {
            width: button_w,
            ..rows[2]
        };
        self.draw_button(frame, rows[2], focused, state);
    }

    fn height(&self, _state: &FormState) -> u16 {
        7
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

/// Truncate `text` to `max` display columns, ending in "…" when cut.
fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
