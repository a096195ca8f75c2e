//! TUI runner — ratatui event loop with terminal setup and cleanup.
//!
//! The [`Tui`] struct owns the ratatui terminal, the view state machine
//! ([`App`]), and the [`Roster`]. It runs the main loop: drain roster
//! events, draw a frame, poll for keyboard input, and dispatch actions.
//! Storage work never happens here — mutations are queued on the roster and
//! their results arrive as events on a later tick.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;

use agentdesk_core::roster::Roster;

use crate::app::{App, AppAction, AppState, Key};
use crate::detail_view;
use crate::list_view;


/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    roster: Roster,
    tick_rate: Duration,
}

impl Tui {
    /// Create a new TUI around a roster, entering raw mode and the
    /// alternate screen.
    pub fn new(roster: Roster) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app: App::new(),
            roster,
            tick_rate: Duration::from_millis(250),
        })
    }

    /// Run the main event loop until quit is requested.
    pub fn run(&mut self) -> Result<(), io::Error> {
        // The list triggers a reload on first display.
        self.roster.reload();

        loop {
            self.drain_roster();

            let app = &self.app;
            let agents = self.roster.agents();
            self.terminal
                .draw(|frame| render_frame(frame, app, agents))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key_event) = event::read()? {
                    // Ctrl-C always quits immediately.
                    if key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    if let Some(key) = crossterm_to_key(key_event) {
                        if let Some(action) = self.app.handle_key(key) {
                            if self.handle_action(action) {
                                break;
                            }
                        }
                    }
                }
            }
        }

        self.shutdown()
    }

    /// Apply pending roster events, surface failures in the status line,
    /// and keep the list selection valid.
    fn drain_roster(&mut self) {
        self.roster.poll();
        if let Some(err) = self.roster.take_error() {
            self.app.set_status(&err, now_ms());
        }
        self.app.clear_expired_status(now_ms());
        let len = self.roster.agents().len();
        self.app.clamp_selection(len);
    }

    // -------------------------------------------------------------------
    // Action handling
    // -------------------------------------------------------------------

    /// Handle an `AppAction`. Returns `true` if the application should quit.
    fn handle_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Quit => return true,
            AppAction::Reload => {
                self.roster.reload();
            }
            AppAction::SelectNext => {
                let max = self.roster.agents().len().saturating_sub(1);
                self.app.select_next(max);
            }
            AppAction::SelectPrev => {
                self.app.select_prev();
            }
            AppAction::OpenSelected => {
                let selected = self.roster.agents().get(self.app.selected_index).cloned();
                if let Some(agent) = selected {
                    self.app.open_detail(Some(agent));
                }
            }
            AppAction::AddNew => {
                self.app.open_detail(None);
            }
            AppAction::Save => self.save(),
            AppAction::Delete => self.delete(),
            AppAction::Back => {
                self.app.back();
            }
        }
        false
    }

    /// Persist the detail form: insert in add-new mode, update otherwise.
    /// Validation failures stay on the form with a status message.
    fn save(&mut self) {
        let existing = match &self.app.state {
            AppState::Detail { agent } => agent.clone(),
            AppState::List => return,
        };
        let draft = self.app.form.draft();
        let result = match &existing {
            Some(agent) => self.roster.update(agent, &draft),
            None => self.roster.add(&draft),
        };
        match result {
            Ok(()) => {
                self.app.finish_detail();
                self.app.set_status("Saved", now_ms());
            }
            Err(e) => {
                self.app.set_status(&format!("Cannot save — {}", e), now_ms());
            }
        }
    }

    /// Delete the record being edited. Does nothing in add-new mode.
    fn delete(&mut self) {
        if let AppState::Detail { agent: Some(agent) } = &self.app.state {
            let id = agent.id;
            let name = agent.display_name();
            self.roster.remove(id);
            self.app.finish_detail();
            self.app.set_status(&format!("Deleted {}", name), now_ms());
        }
    }

    // -------------------------------------------------------------------
    // Shutdown
    // -------------------------------------------------------------------

    /// Restore the terminal to its normal state.
    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}


// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the full screen: title bar, current screen, status line.
fn render_frame(frame: &mut Frame, app: &App, agents: &[agentdesk_core::types::Agent]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(5),    // screen
            Constraint::Length(1), // status line
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0], app);

    match &app.state {
        AppState::List => {
            list_view::render_list(frame, chunks[1], agents, app.selected_index);
        }
        AppState::Detail { agent } => {
            detail_view::render_detail(frame, chunks[1], &app.form, agent.as_ref());
        }
    }

    render_status_line(frame, chunks[2], app);
}


/// Title bar: app name, current screen, and a back indicator when the
/// back-stack is non-empty.
fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let back = if app.stack_depth() > 0 { "\u{25c2} " } else { "" };
    let text = format!(" {}AgentDesk — {}", back, app.state.label());
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);
}


/// Status line: the transient status message, when one is alive.
fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.status_message() {
        Some(msg) => (format!(" {}", msg), Style::default().fg(Color::Yellow)),
        None => (String::new(), Style::default()),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}


// ---------------------------------------------------------------------------
// Key mapping
// ---------------------------------------------------------------------------

/// Map a crossterm key event to the app's simplified [`Key`].
fn crossterm_to_key(event: KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = event.code {
            return Some(Key::Ctrl(ch.to_ascii_lowercase()));
        }
    }
    match event.code {
        KeyCode::Char(ch) => Some(Key::Char(ch)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        _ => None,
    }
}


fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
