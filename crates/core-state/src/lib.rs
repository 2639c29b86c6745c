//! Editor session state: the active buffer, current mode, and the small
//! pieces of Normal-mode bookkeeping (pending key window, count prefix,
//! clipboard register) that the dispatcher threads through every keystroke.
//!
//! `EditorState` is passed explicitly to the dispatcher and the modal
//! handlers; nothing here is global. Rendering reads it, only the dispatcher
//! and handlers mutate it.

use std::path::PathBuf;

use core_text::TextBuffer;
use smallvec::SmallVec;

/// Current editor mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Command/navigation mode.
    #[default]
    Normal,
    /// Text entry.
    Insert,
    /// `:` prompt; keys go to the command-line handler.
    CommandLine,
    /// `/` or `?` prompt; keys go to the find handler.
    Find,
}

impl Mode {
    /// Lowercase name shown in the status line.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::CommandLine => "command",
            Mode::Find => "find",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capacity of the pending key window.
pub const PENDING_WINDOW: usize = 3;

/// Sliding window of the last few ordinary Normal-mode characters. Used to
/// recognise compound sequences like `dd`, `yy`, `diw` and `gg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingKeys {
    keys: SmallVec<[char; PENDING_WINDOW]>,
}

impl PendingKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `c`, dropping the oldest char once the window is full.
    pub fn push(&mut self, c: char) {
        if self.keys.len() == PENDING_WINDOW {
            self.keys.remove(0);
        }
        self.keys.push(c);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.keys
    }

    /// True when the window ends with `seq`.
    pub fn ends_with(&self, seq: &str) -> bool {
        let n = seq.chars().count();
        n <= self.keys.len() && self.keys[self.keys.len() - n..].iter().copied().eq(seq.chars())
    }

    /// A compound operator is waiting for its next key: the last char is
    /// `d` or `y`, or the window ends with `di`.
    pub fn awaits_completion(&self) -> bool {
        matches!(self.keys.last(), Some('d') | Some('y')) || self.ends_with("di")
    }
}

impl std::fmt::Display for PendingKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.keys.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Accumulated count digits typed before `G`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountPrefix {
    digits: String,
}

impl CountPrefix {
    /// Append a digit; non-digit chars are ignored.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.digits.push(c);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Parsed value (saturating on overflow), clearing the prefix.
    pub fn take(&mut self) -> Option<usize> {
        if self.digits.is_empty() {
            return None;
        }
        let n = self.digits.bytes().fold(0usize, |acc, b| {
            acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        });
        self.digits.clear();
        Some(n)
    }
}

/// Single-slot clipboard written by yank/delete and read by paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    text: String,
}

impl Register {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        tracing::trace!(target: "state.register", len = self.text.len(), "register_write");
    }

    pub fn get(&self) -> &str {
        &self.text
    }
}

/// Top-level editor session.
#[derive(Debug, Default)]
pub struct EditorState {
    pub buffer: TextBuffer,
    pub mode: Mode,
    pub pending: PendingKeys,
    pub count: CountPrefix,
    pub register: Register,
    /// Working filename remembered by `w <file>` and `o <file>`.
    pub file_name: Option<PathBuf>,
    /// One-shot status message, cleared at the start of the next key.
    pub message: Option<String>,
}

impl EditorState {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            ..Self::default()
        }
    }

    /// Switch mode. Any half-typed compound sequence is discarded.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(target: "state.mode", from = self.mode.as_str(), to = mode.as_str(), "mode_change");
        }
        self.mode = mode;
        self.pending.clear();
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_names_are_lowercase() {
        assert_eq!(Mode::Normal.as_str(), "normal");
        assert_eq!(Mode::Insert.as_str(), "insert");
        assert_eq!(Mode::CommandLine.as_str(), "command");
        assert_eq!(Mode::Find.to_string(), "find");
    }

    #[test]
    fn pending_window_keeps_last_three() {
        let mut p = PendingKeys::new();
        for c in "abcd".chars() {
            p.push(c);
        }
        assert_eq!(p.as_slice(), &['b', 'c', 'd']);
        assert!(p.ends_with("cd"));
        assert!(p.ends_with("bcd"));
        assert!(!p.ends_with("abcd"));
    }

    #[test]
    fn pending_awaits_completion() {
        let mut p = PendingKeys::new();
        assert!(!p.awaits_completion());
        p.push('d');
        assert!(p.awaits_completion());
        p.push('i');
        assert!(p.awaits_completion());
        p.push('x');
        assert!(!p.awaits_completion());
        p.clear();
        p.push('y');
        assert!(p.awaits_completion());
        p.push('g');
        assert!(!p.awaits_completion());
    }

    #[test]
    fn count_prefix_take_clears() {
        let mut c = CountPrefix::default();
        assert_eq!(c.take(), None);
        c.push('4');
        c.push('x');
        c.push('2');
        assert_eq!(c.as_str(), "42");
        assert_eq!(c.take(), Some(42));
        assert!(c.is_empty());
    }

    #[test]
    fn count_prefix_saturates() {
        let mut c = CountPrefix::default();
        for _ in 0..40 {
            c.push('9');
        }
        assert_eq!(c.take(), Some(usize::MAX));
    }

    #[test]
    fn set_mode_clears_pending() {
        let mut s = EditorState::default();
        s.pending.push('d');
        s.set_mode(Mode::Insert);
        assert!(s.pending.is_empty());
        assert_eq!(s.mode, Mode::Insert);
    }
}
