//! Normal mode key handling.
//!
//! Resolution order for one key:
//! 1. a pending compound operator (`d`, `y`, `di`) takes the next char
//!    exclusively;
//! 2. the direct table (single-key commands and named keys);
//! 3. digits accumulate into the count prefix;
//! 4. any other char extends the pending window and is matched against the
//!    compound table (`diw`, `gg`, `dd`, `yy`, `yw`).

use anyhow::Result;
use core_events::Key;
use core_state::EditorState;
use core_terminal::TerminalBackend;

use super::ModalDispatcher;
use super::mode::{ModeChange, handle_mode_change};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordStart,
    WordEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direct {
    Motion(MotionKind),
    DeleteForward,
    DeleteBackward,
    Paste,
    ReplaceChar,
    GotoLine,
    ModeChange(ModeChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compound {
    DeleteWord,
    GotoTop,
    DeleteLine,
    YankLine,
    YankWord,
}

// Longest sequences first so `diw` wins over any shorter suffix.
const COMPOUNDS: [(&str, Compound); 5] = [
    ("diw", Compound::DeleteWord),
    ("gg", Compound::GotoTop),
    ("dd", Compound::DeleteLine),
    ("yy", Compound::YankLine),
    ("yw", Compound::YankWord),
];

fn direct_for_char(c: char) -> Option<Direct> {
    let d = match c {
        '^' => Direct::Motion(MotionKind::LineStart),
        '$' => Direct::Motion(MotionKind::LineEnd),
        'w' => Direct::Motion(MotionKind::WordEnd),
        'b' => Direct::Motion(MotionKind::WordStart),
        'G' => Direct::GotoLine,
        'x' => Direct::DeleteForward,
        'p' => Direct::Paste,
        'r' => Direct::ReplaceChar,
        'i' => Direct::ModeChange(ModeChange::Insert),
        'I' => Direct::ModeChange(ModeChange::InsertAtLineStart),
        'A' => Direct::ModeChange(ModeChange::AppendAtLineEnd),
        'S' => Direct::ModeChange(ModeChange::SubstituteLine),
        ':' => Direct::ModeChange(ModeChange::CommandLine),
        '/' => Direct::ModeChange(ModeChange::Find { forward: true }),
        '?' => Direct::ModeChange(ModeChange::Find { forward: false }),
        _ => return None,
    };
    Some(d)
}

fn direct_for_key(key: Key) -> Option<Direct> {
    let d = match key {
        Key::Char(c) => return direct_for_char(c),
        Key::Backspace => Direct::DeleteBackward,
        Key::Left => Direct::Motion(MotionKind::Left),
        Key::Right => Direct::Motion(MotionKind::Right),
        Key::Up => Direct::Motion(MotionKind::Up),
        Key::Down => Direct::Motion(MotionKind::Down),
        Key::PageUp => Direct::Motion(MotionKind::PageUp),
        Key::PageDown => Direct::Motion(MotionKind::PageDown),
        Key::Enter | Key::Esc | Key::Resize | Key::Other => return None,
    };
    Some(d)
}

pub(crate) fn handle_normal(
    dispatcher: &mut ModalDispatcher,
    key: Key,
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
) -> Result<()> {
    if state.pending.awaits_completion() {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                state.count.push(c);
                return Ok(());
            }
            Key::Char(c) => {
                state.count.clear();
                extend_compound(c, state);
                return Ok(());
            }
            Key::Esc => {
                state.pending.clear();
                return Ok(());
            }
            _ => state.pending.clear(),
        }
    }

    if let Some(action) = direct_for_key(key) {
        return apply_direct(action, dispatcher, state, term);
    }

    match key {
        Key::Char(c) if c.is_ascii_digit() => state.count.push(c),
        Key::Char(c) => {
            state.count.clear();
            extend_compound(c, state);
        }
        Key::Esc => {
            state.count.clear();
            state.pending.clear();
        }
        _ => {}
    }
    Ok(())
}

fn apply_direct(
    action: Direct,
    dispatcher: &mut ModalDispatcher,
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
) -> Result<()> {
    tracing::trace!(target: "actions.dispatch", ?action, "direct");
    match action {
        Direct::Motion(kind) => {
            let page = match kind {
                MotionKind::PageUp | MotionKind::PageDown => dispatcher.page_rows(term)?,
                _ => 0,
            };
            handle_motion(kind, page, state);
        }
        Direct::DeleteForward => state.buffer.delete_char_forward(),
        Direct::DeleteBackward => state.buffer.delete_char_backward(),
        Direct::Paste => {
            let text = state.register.get().to_string();
            state.buffer.paste(&text);
        }
        Direct::ReplaceChar => {
            if let Some(c) = term.read_key()?.printable() {
                state.buffer.replace_char(c);
            }
        }
        Direct::GotoLine => {
            let row = match state.count.take() {
                Some(n) => n.saturating_sub(1),
                None => state.buffer.line_count() - 1,
            };
            state.buffer.set_cursor(0, row);
        }
        Direct::ModeChange(mc) => handle_mode_change(mc, dispatcher, state),
    }
    Ok(())
}

pub(crate) fn handle_motion(kind: MotionKind, page: usize, state: &mut EditorState) {
    let buf = &mut state.buffer;
    match kind {
        MotionKind::Left => buf.move_cursor(-1, 0),
        MotionKind::Right => buf.move_cursor(1, 0),
        MotionKind::Up => buf.move_cursor(0, -1),
        MotionKind::Down => buf.move_cursor(0, 1),
        MotionKind::LineStart => buf.str_to_start(),
        MotionKind::LineEnd => buf.str_to_end(),
        MotionKind::WordStart => buf.word_to_start(),
        MotionKind::WordEnd => buf.word_to_end(),
        MotionKind::PageUp => buf.page_up(page),
        MotionKind::PageDown => buf.page_down(page),
    }
}

/// Push `c` into the pending window and run the first compound it completes.
fn extend_compound(c: char, state: &mut EditorState) {
    state.pending.push(c);
    let Some(&(seq, op)) = COMPOUNDS
        .iter()
        .find(|(seq, _)| state.pending.ends_with(seq))
    else {
        return;
    };
    tracing::trace!(target: "actions.dispatch", seq, "compound");
    state.pending.clear();
    match op {
        Compound::DeleteWord => {
            if let Some(word) = state.buffer.delete_word() {
                state.register.set(word);
            }
        }
        Compound::GotoTop => state.buffer.set_cursor(0, 0),
        Compound::DeleteLine => {
            let line = state.buffer.delete_line();
            state.register.set(line);
        }
        Compound::YankLine => {
            let line = state.buffer.copy_line();
            state.register.set(line);
        }
        Compound::YankWord => {
            if let Some(word) = state.buffer.copy_word() {
                state.register.set(word);
            }
        }
    }
}
