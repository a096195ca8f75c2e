//! Field editing for the detail screen.
//!
//! [`FieldEditor`] is a single-line text buffer with cursor movement; the
//! buffer is a `Vec<char>` so cursor operations stay correct with
//! multi-byte characters. [`DetailForm`] groups one editor per editable
//! agent attribute and tracks which one has focus.

use agentdesk_core::types::AgentDraft;


// ---------------------------------------------------------------------------
// FieldEditor
// ---------------------------------------------------------------------------

/// A single editable text field with a cursor.
#[derive(Debug, Clone, Default)]
pub struct FieldEditor {
    buffer: Vec<char>,
    cursor: usize,
}

impl FieldEditor {
    pub fn new() -> Self {
        FieldEditor::default()
    }

    /// Create an editor pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let buffer: Vec<char> = text.chars().collect();
        let cursor = buffer.len();
        FieldEditor { buffer, cursor }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the character at the cursor (forward delete).
    pub fn delete_forward(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}


// ---------------------------------------------------------------------------
// DetailForm
// ---------------------------------------------------------------------------

/// Number of editable fields on the detail screen.
pub const FIELD_COUNT: usize = 6;

/// Labels in display order, matching the draft's field order.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "First name",
    "Middle initial",
    "Last name",
    "Business phone",
    "Email",
    "Position",
];

/// One editor per editable agent attribute, plus focus tracking.
#[derive(Debug, Clone)]
pub struct DetailForm {
    fields: Vec<FieldEditor>,
    focus: usize,
}

impl DetailForm {
    /// An empty form (add-new mode).
    pub fn blank() -> Self {
        DetailForm {
            fields: (0..FIELD_COUNT).map(|_| FieldEditor::new()).collect(),
            focus: 0,
        }
    }

    /// A form seeded from an existing record's editable fields.
    pub fn seeded(draft: &AgentDraft) -> Self {
        let values = [
            &draft.first_name,
            &draft.middle_initial,
            &draft.last_name,
            &draft.business_phone,
            &draft.email,
            &draft.position,
        ];
        DetailForm {
            fields: values.iter().map(|v| FieldEditor::with_text(v)).collect(),
            focus: 0,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Move focus to the next field, wrapping at the bottom.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    /// Move focus to the previous field, wrapping at the top.
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    pub fn editor(&self, index: usize) -> &FieldEditor {
        &self.fields[index]
    }

    /// The editor currently holding focus.
    pub fn focused_mut(&mut self) -> &mut FieldEditor {
        &mut self.fields[self.focus]
    }

    pub fn focused(&self) -> &FieldEditor {
        &self.fields[self.focus]
    }

    /// Collect the current field values into a draft.
    pub fn draft(&self) -> AgentDraft {
        AgentDraft {
            first_name: self.fields[0].text(),
            middle_initial: self.fields[1].text(),
            last_name: self.fields[2].text(),
            business_phone: self.fields[3].text(),
            email: self.fields[4].text(),
            position: self.fields[5].text(),
        }
    }
}

impl Default for DetailForm {
    fn default() -> Self {
        Self::blank()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
