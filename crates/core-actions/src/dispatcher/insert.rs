//! Insert mode key handling.

use core_events::Key;
use core_state::EditorState;

use super::ModalDispatcher;
use super::mode::{ModeChange, handle_mode_change};

pub(crate) fn handle_insert(dispatcher: &mut ModalDispatcher, key: Key, state: &mut EditorState) {
    if key == Key::Esc {
        handle_mode_change(ModeChange::LeaveInsert, dispatcher, state);
        return;
    }
    let buf = &mut state.buffer;
    match key {
        Key::Enter => buf.insert_char('\n'),
        Key::Backspace => buf.delete_char_backward(),
        Key::Left => buf.move_cursor(-1, 0),
        Key::Right => buf.move_cursor(1, 0),
        Key::Up => buf.move_cursor(0, -1),
        Key::Down => buf.move_cursor(0, 1),
        k => {
            if let Some(c) = k.printable() {
                buf.insert_char(c);
            }
        }
    }
}
