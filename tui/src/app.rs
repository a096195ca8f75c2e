//! View state machine for the AgentDesk TUI.
//!
//! Two screens — the agent list and the detail form — with a back-stack.
//! The `App` struct owns all UI state: what the user is looking at, which
//! row is selected, and what they have typed into the form. It performs no
//! I/O; storage actions are returned to the runner as [`AppAction`]s.

use agentdesk_core::types::{Agent, AgentDraft};

use crate::form::DetailForm;


// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// The agent list (initial screen).
    List,
    /// The detail form. `agent` is the record being edited, or `None` in
    /// add-new mode.
    Detail { agent: Option<Agent> },
}

impl AppState {
    /// Short label for the title bar.
    pub fn label(&self) -> &str {
        match self {
            AppState::List => "Agents",
            AppState::Detail { agent: Some(_) } => "Edit Agent",
            AppState::Detail { agent: None } => "New Agent",
        }
    }
}


// ---------------------------------------------------------------------------
// AppAction
// ---------------------------------------------------------------------------

/// An action the runner must carry out in response to user input.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application.
    Quit,
    /// Re-fetch the snapshot from the store.
    Reload,
    /// Open the currently selected agent in the detail form.
    OpenSelected,
    /// Open a blank detail form.
    AddNew,
    /// Move the list selection down.
    SelectNext,
    /// Move the list selection up.
    SelectPrev,
    /// Persist the detail form (insert or update).
    Save,
    /// Delete the record being edited.
    Delete,
    /// Leave the detail form without saving.
    Back,
}


// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level UI state: current screen, back-stack, list selection, detail
/// form, and the transient status message.
pub struct App {
    /// Current screen.
    pub state: AppState,
    /// Stack of previous screens for back-navigation.
    previous_states: Vec<AppState>,
    /// Transient status message with its creation timestamp (ms).
    status_message: Option<(String, u64)>,
    /// How long status messages live, in milliseconds.
    status_ttl_ms: u64,
    /// Selected row in the list view.
    pub selected_index: usize,
    /// The detail form; meaningful only while in `Detail`.
    pub form: DetailForm,
}

impl App {
    /// Create a new App showing the list.
    pub fn new() -> Self {
        App {
            state: AppState::List,
            previous_states: Vec::new(),
            status_message: None,
            status_ttl_ms: 4000,
            selected_index: 0,
            form: DetailForm::blank(),
        }
    }

    // -------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------

    /// Open the detail form, seeding it from `agent` (blank when `None`),
    /// and push the list onto the back-stack.
    pub fn open_detail(&mut self, agent: Option<Agent>) {
        self.form = match &agent {
            Some(a) => DetailForm::seeded(&AgentDraft::from_agent(a)),
            None => DetailForm::blank(),
        };
        let old = std::mem::replace(&mut self.state, AppState::Detail { agent });
        self.previous_states.push(old);
    }

    /// Return to the list after a save or delete, clearing the back-stack
    /// so repeated forward/back never stacks duplicate list entries.
    pub fn finish_detail(&mut self) {
        self.previous_states.clear();
        self.state = AppState::List;
    }

    /// Pop the back-stack (Escape). Falls back to the list when empty.
    pub fn back(&mut self) {
        self.state = self.previous_states.pop().unwrap_or(AppState::List);
    }

    /// Depth of the back-stack (drives the back indicator in the title).
    pub fn stack_depth(&self) -> usize {
        self.previous_states.len()
    }

    // -------------------------------------------------------------------
    // Status messages
    // -------------------------------------------------------------------

    /// Set a transient status message created at `now_ms`.
    pub fn set_status(&mut self, msg: &str, now_ms: u64) {
        self.status_message = Some((msg.to_string(), now_ms));
    }

    /// Drop the status message once its TTL has passed.
    pub fn clear_expired_status(&mut self, now_ms: u64) {
        if let Some((_, created)) = &self.status_message {
            if now_ms.saturating_sub(*created) >= self.status_ttl_ms {
                self.status_message = None;
            }
        }
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(msg, _)| msg.as_str())
    }

    // -------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------

    /// Move the selection down, clamping to `max_index`.
    pub fn select_next(&mut self, max_index: usize) {
        if self.selected_index < max_index {
            self.selected_index += 1;
        }
    }

    /// Move the selection up, clamping to 0.
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Keep the selection inside the list after the snapshot shrinks.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    // -------------------------------------------------------------------
    // Key routing
    // -------------------------------------------------------------------

    /// Process a key event and return the action the runner should take.
    /// Form edits are applied here directly and return `None`.
    pub fn handle_key(&mut self, key: Key) -> Option<AppAction> {
        match self.state {
            AppState::List => self.handle_list_key(key),
            AppState::Detail { .. } => self.handle_detail_key(key),
        }
    }

    fn handle_list_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Char('q') => Some(AppAction::Quit),
            Key::Char('r') => Some(AppAction::Reload),
            Key::Char('a') => Some(AppAction::AddNew),
            Key::Char('j') | Key::Down => Some(AppAction::SelectNext),
            Key::Char('k') | Key::Up => Some(AppAction::SelectPrev),
            Key::Enter => Some(AppAction::OpenSelected),
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Escape => Some(AppAction::Back),
            Key::Ctrl('s') => Some(AppAction::Save),
            Key::Ctrl('d') => Some(AppAction::Delete),
            Key::Tab | Key::Down | Key::Enter => {
                self.form.focus_next();
                None
            }
            Key::BackTab | Key::Up => {
                self.form.focus_prev();
                None
            }
            Key::Backspace => {
                self.form.focused_mut().delete_back();
                None
            }
            Key::Delete => {
                self.form.focused_mut().delete_forward();
                None
            }
            Key::Left => {
                self.form.focused_mut().move_left();
                None
            }
            Key::Right => {
                self.form.focused_mut().move_right();
                None
            }
            Key::Home => {
                self.form.focused_mut().move_home();
                None
            }
            Key::End => {
                self.form.focused_mut().move_end();
                None
            }
            Key::Ctrl('u') => {
                self.form.focused_mut().clear();
                None
            }
            Key::Char(ch) => {
                self.form.focused_mut().insert(ch);
                None
            }
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A simplified key event, decoupled from the terminal backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Ctrl(char),
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
