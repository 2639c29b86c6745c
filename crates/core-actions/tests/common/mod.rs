#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::ModalDispatcher;
use core_config::Config;
use core_events::Key;
use core_state::{EditorState, Mode};
use core_terminal::{HeadlessBackend, TerminalBackend};
use core_text::TextBuffer;

/// Scripted editing session over a headless terminal.
///
/// Keys are queued on the terminal and dispatched until the queue drains or
/// the dispatcher asks to quit, so `r` reads its argument from the same
/// script the way it would from a real keyboard.
pub struct Session {
    pub state: EditorState,
    pub dispatcher: ModalDispatcher,
    pub term: HeadlessBackend,
    pub quit: bool,
}

impl Session {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_config(lines, Config::default())
    }

    pub fn with_config(lines: &[&str], config: Config) -> Self {
        Self {
            state: EditorState::new(TextBuffer::from_lines(lines.iter().copied())),
            dispatcher: ModalDispatcher::new(config),
            term: HeadlessBackend::new(24, 80),
            quit: false,
        }
    }

    /// Type `text` as plain char keys.
    pub fn send(&mut self, text: &str) -> &mut Self {
        self.term.push_str(text);
        self.drain()
    }

    pub fn key(&mut self, key: Key) -> &mut Self {
        self.term.push_key(key);
        self.drain()
    }

    /// `:` + `cmd` + Enter from Normal mode.
    pub fn command(&mut self, cmd: &str) -> &mut Self {
        self.send(":").send(cmd).key(Key::Enter)
    }

    pub fn at(&mut self, col: usize, row: usize) -> &mut Self {
        self.state.buffer.set_cursor(col, row);
        self
    }

    fn drain(&mut self) -> &mut Self {
        while self.term.pending_keys() > 0 && !self.quit {
            let key = self.term.read_key().expect("queued key");
            let res = self
                .dispatcher
                .handle_key(key, &mut self.state, &mut self.term)
                .expect("dispatch");
            self.quit = res.quit;
        }
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.buffer.save()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.state.buffer.cursor().pos()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }
}
