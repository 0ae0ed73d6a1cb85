//! MetadataTable: property/value rows for the last accepted upload.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::FormState,
    component::Component,
    surface::MetadataRow,
    theme::{C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct MetadataTable;

impl MetadataTable {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetadataTable {
    fn default() -> Self {
        Self::new()
    }
}

fn build_lines(rows: &[MetadataRow]) -> Vec<Line<'static>> {
    let width = rows
        .iter()
        .map(|r| r.property.len())
        .max()
        .unwrap_or(0)
        .max("Property".len());

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(Line::from(Span::styled(
        format!(" {:<width$}  {}", "Property", "Value"),
        Style::default()
            .fg(C_SECONDARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    for row in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}  ", row.property),
                Style::default().fg(C_SECONDARY),
            ),
            Span::styled(row.value.clone(), Style::default().fg(C_PRIMARY)),
        ]));
    }
    lines
}

impl Component for MetadataTable {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &FormState) {
        if !state.metadata_visible {
            return;
        }
        let block = pane_chrome("File Details", focused, None);
        frame.render_widget(
            Paragraph::new(build_lines(&state.metadata_rows)).block(block),
            area,
        );
    }

    fn height(&self, state: &FormState) -> u16 {
        if state.metadata_visible {
            // borders + header + rows
            state.metadata_rows.len() as u16 + 3
        } else {
            0
        }
    }
}
