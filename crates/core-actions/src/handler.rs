//! Shared interface of the line-editing sub-modes (command line and find).
//!
//! A handler owns its input buffer and an active flag. The dispatcher
//! forwards every key while the matching mode is current and returns to
//! Normal as soon as `is_active()` turns false.

use core_events::Key;
use core_state::EditorState;

/// What the run loop should do after a handler consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    /// Leave the editor (exit code 0).
    Exit,
}

pub trait ModalInputHandler {
    /// Start a fresh input session with an empty buffer.
    fn activate(&mut self);
    /// End the session and clear the buffer.
    fn deactivate(&mut self);
    fn handle_input(&mut self, key: Key, state: &mut EditorState) -> InputOutcome;
    /// Text typed so far, without the prompt char.
    fn buffer(&self) -> &str;
    fn is_active(&self) -> bool;
    /// Prompt char shown before the buffer on the status line.
    fn prompt_char(&self) -> char;

    fn prompt(&self) -> String {
        let mut s = String::with_capacity(self.buffer().len() + 1);
        s.push(self.prompt_char());
        s.push_str(self.buffer());
        s
    }
}

/// Line-editing keys shared by both handlers.
pub(crate) enum LineEdit {
    Cancel,
    Submit,
    Edited,
    Ignored,
}

/// Apply `key` to a prompt buffer: printable chars append, Backspace trims.
pub(crate) fn edit_line(buffer: &mut String, key: Key) -> LineEdit {
    match key {
        Key::Esc => LineEdit::Cancel,
        Key::Enter => LineEdit::Submit,
        Key::Backspace => {
            buffer.pop();
            LineEdit::Edited
        }
        k => match k.printable() {
            Some(c) => {
                buffer.push(c);
                LineEdit::Edited
            }
            None => LineEdit::Ignored,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_line_appends_and_trims() {
        let mut b = String::new();
        assert!(matches!(edit_line(&mut b, Key::Char('w')), LineEdit::Edited));
        assert!(matches!(edit_line(&mut b, Key::Char(' ')), LineEdit::Edited));
        assert!(matches!(edit_line(&mut b, Key::Char('"')), LineEdit::Edited));
        assert_eq!(b, "w \"");
        edit_line(&mut b, Key::Backspace);
        assert_eq!(b, "w ");
        assert!(matches!(edit_line(&mut b, Key::Left), LineEdit::Ignored));
        assert!(matches!(edit_line(&mut b, Key::Enter), LineEdit::Submit));
        assert!(matches!(edit_line(&mut b, Key::Esc), LineEdit::Cancel));
        let mut empty = String::new();
        edit_line(&mut empty, Key::Backspace);
        assert!(empty.is_empty());
    }
}
