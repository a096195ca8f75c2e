//! Detail screen — the add/edit form for a single agent.
//!
//! Renders one labelled line per editable field inside a bordered block,
//! highlights the focused field, and places the hardware cursor at the
//! focused field's cursor position.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use agentdesk_core::types::Agent;

use crate::form::{DetailForm, FIELD_COUNT, FIELD_LABELS};

/// Width every label is padded to, so the value column lines up.
const LABEL_WIDTH: usize = 16;


/// Render the detail screen for `form`. `existing` is the record being
/// edited, or `None` in add-new mode (which disables delete).
pub fn render_detail(frame: &mut Frame, area: Rect, form: &DetailForm, existing: Option<&Agent>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_COUNT as u16 + 2), // form + borders
            Constraint::Min(0),                         // spacer
            Constraint::Length(1),                      // key hints
        ])
        .split(area);

    render_fields(frame, chunks[0], form, existing);
    render_hints(frame, chunks[2], existing.is_some());
}


fn render_fields(frame: &mut Frame, area: Rect, form: &DetailForm, existing: Option<&Agent>) {
    let lines: Vec<Line> = (0..FIELD_COUNT)
        .map(|i| {
            let label = format!("{:<width$}", FIELD_LABELS[i], width = LABEL_WIDTH);
            let value = form.editor(i).text();
            if i == form.focus() {
                Line::from(vec![
                    Span::styled(label, Style::default().bold()),
                    Span::styled(value, Style::default().fg(Color::Cyan)),
                ])
            } else {
                Line::from(vec![
                    Span::styled(label, Style::default().fg(Color::DarkGray)),
                    Span::raw(value),
                ])
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title_for(existing));
    frame.render_widget(Paragraph::new(lines).block(block), area);

    // Hardware cursor inside the focused field's value.
    let (x, y) = cursor_position(area, form);
    frame.set_cursor_position((x, y));
}


/// Border title: the record's name when editing, otherwise "New Agent".
fn title_for(existing: Option<&Agent>) -> String {
    match existing {
        Some(agent) => format!(" Agent {} — {} ", agent.id, agent.display_name()),
        None => " New Agent ".into(),
    }
}


/// Screen coordinates of the cursor: inside the border, past the label,
/// offset by the focused editor's cursor.
fn cursor_position(area: Rect, form: &DetailForm) -> (u16, u16) {
    let x = area.x + 1 + LABEL_WIDTH as u16 + form.focused().cursor_pos() as u16;
    let y = area.y + 1 + form.focus() as u16;
    (x, y)
}


fn render_hints(frame: &mut Frame, area: Rect, can_delete: bool) {
    let mut hints = String::from(" Tab next field   Ctrl-S save");
    if can_delete {
        hints.push_str("   Ctrl-D delete");
    }
    hints.push_str("   Esc back");
    let paragraph = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
