//! List screen — the agent table with a highlighted selection row.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use agentdesk_core::types::{Agent, DEFAULT_IMAGE_REF};


/// Render the list screen: agent table plus a one-line summary.
pub fn render_list(frame: &mut Frame, area: Rect, agents: &[Agent], selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // agent table
            Constraint::Length(1), // summary
        ])
        .split(area);

    render_agent_table(frame, chunks[0], agents, selected);
    render_summary(frame, chunks[1], agents);
}


fn render_agent_table(frame: &mut Frame, area: Rect, agents: &[Agent], selected: usize) {
    if agents.is_empty() {
        let empty = Paragraph::new("  No agents yet. Press 'a' to add one.")
            .block(Block::default().borders(Borders::ALL).title(" Agents "));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["", "Name", "Position", "Phone", "Email"])
        .style(Style::default().bold());

    let rows: Vec<Row> = agents
        .iter()
        .enumerate()
        .map(|(i, agent)| {
            let style = if i == selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(avatar_glyph(agent)),
                Cell::from(agent.display_name()),
                Cell::from(agent.position.clone().unwrap_or_default()),
                Cell::from(agent.business_phone.clone().unwrap_or_default()),
                Cell::from(agent.email.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // avatar
            Constraint::Length(20), // name
            Constraint::Length(20), // position
            Constraint::Length(16), // phone
            Constraint::Fill(1),    // email
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Agents "));

    frame.render_widget(table, area);
}


/// Placeholder for the agent's display image: there is only one static
/// asset, so anything else renders hollow.
fn avatar_glyph(agent: &Agent) -> &'static str {
    if agent.image_ref == DEFAULT_IMAGE_REF {
        "\u{25c9}" // ◉
    } else {
        "\u{25cb}" // ○
    }
}


fn render_summary(frame: &mut Frame, area: Rect, agents: &[Agent]) {
    let text = format!(
        " {} agent{}   a add   Enter edit   r reload   q quit",
        agents.len(),
        if agents.len() == 1 { "" } else { "s" },
    );
    let summary = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(summary, area);
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
