//! Incremental-prompt substring search (`/` forward, `?` backward).
//!
//! Two sub-states while active: typing (keys edit the search buffer) and
//! confirmed (after Enter). In the confirmed state `n` searches forward,
//! `N` searches backward and any other key ends the session.

use core_events::Key;
use core_state::EditorState;

use crate::handler::{InputOutcome, LineEdit, ModalInputHandler, edit_line};

#[derive(Debug)]
pub struct FindHandler {
    buffer: String,
    active: bool,
    confirmed: bool,
    forward: bool,
    last_search: String,
}

impl Default for FindHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FindHandler {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            active: false,
            confirmed: false,
            forward: true,
            last_search: String::new(),
        }
    }

    /// Activate with a fixed direction.
    pub fn begin(&mut self, forward: bool) {
        self.forward = forward;
        self.activate();
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn last_search(&self) -> &str {
        &self.last_search
    }

    fn search(&mut self, state: &mut EditorState) {
        let found = state.buffer.search(&self.last_search, self.forward);
        tracing::debug!(
            target: "actions.find",
            forward = self.forward,
            found,
            "search"
        );
        if !found && !self.last_search.is_empty() {
            state.set_message(format!("Pattern not found: {}", self.last_search));
        }
    }
}

impl ModalInputHandler for FindHandler {
    fn activate(&mut self) {
        self.active = true;
        self.confirmed = false;
        self.buffer.clear();
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.confirmed = false;
        self.buffer.clear();
    }

    fn handle_input(&mut self, key: Key, state: &mut EditorState) -> InputOutcome {
        if self.confirmed {
            match key {
                Key::Char('n') => {
                    self.forward = true;
                    self.search(state);
                }
                Key::Char('N') => {
                    self.forward = false;
                    self.search(state);
                }
                _ => self.deactivate(),
            }
            return InputOutcome::Continue;
        }
        match edit_line(&mut self.buffer, key) {
            LineEdit::Cancel => self.deactivate(),
            LineEdit::Submit => {
                if !self.buffer.is_empty() {
                    self.last_search = self.buffer.clone();
                }
                self.search(state);
                self.confirmed = true;
            }
            LineEdit::Edited | LineEdit::Ignored => {}
        }
        InputOutcome::Continue
    }

    fn buffer(&self) -> &str {
        &self.buffer
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn prompt_char(&self) -> char {
        if self.forward { '/' } else { '?' }
    }
}
