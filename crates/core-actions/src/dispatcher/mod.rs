//! Modal key dispatcher.
//!
//! One call to `ModalDispatcher::handle_key` processes one logical key:
//! * the one-shot status message is cleared;
//! * a sub-handler mode whose handler already deactivated falls back to Normal;
//! * the key is routed by mode (`normal`, `insert`, or the command-line /
//!   find handlers);
//! * the mode is re-synchronised so a handler that just deactivated is
//!   reflected before the next render;
//! * `TextChanged` is broadcast so subscribers redraw.
//!
//! Sub-modules:
//! * `normal`  - Normal mode direct and compound tables
//! * `insert`  - Insert mode text entry
//! * `mode`    - mode transitions
//! * `command` - command line handler (`:`)
//! * `find`    - search handler (`/`, `?`)

use anyhow::Result;
use core_config::Config;
use core_events::{EditorEvent, Key};
use core_state::{EditorState, Mode};
use core_terminal::TerminalBackend;

use crate::handler::{InputOutcome, ModalInputHandler};

mod command;
mod command_parser;
mod find;
mod insert;
mod mode;
mod normal;

pub use command::CommandLineHandler;
pub use command_parser::{CommandParser, ParsedCommand, tokenize};
pub use find::FindHandler;

/// Result of dispatching a single key.
///
/// Every handled key broadcasts `TextChanged` on the buffer, which is what
/// listeners redraw on. `dirty` is set only when a frame is due without a
/// buffer event (a resize) or the loop must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Status-line prompt of an active sub-handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Prompt char followed by the typed text, e.g. `:w out.txt`.
    pub text: String,
    /// True while keys edit the prompt; the terminal cursor belongs there.
    pub editing: bool,
}

#[derive(Debug)]
pub struct ModalDispatcher {
    command_line: CommandLineHandler,
    find: FindHandler,
    config: Config,
}

impl ModalDispatcher {
    pub fn new(config: Config) -> Self {
        Self {
            command_line: CommandLineHandler::new(config.help_path().clone()),
            find: FindHandler::new(),
            config,
        }
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        state: &mut EditorState,
        term: &mut dyn TerminalBackend,
    ) -> Result<DispatchResult> {
        if key == Key::Resize {
            return Ok(DispatchResult::dirty());
        }
        state.clear_message();
        self.sync_mode(state);
        let mode = state.mode;
        tracing::trace!(target: "actions.dispatch", mode = mode.as_str(), %key, "key");

        let mut result = DispatchResult::clean();
        match mode {
            Mode::Normal => normal::handle_normal(self, key, state, term)?,
            Mode::Insert => insert::handle_insert(self, key, state),
            Mode::CommandLine => {
                if self.command_line.handle_input(key, state) == InputOutcome::Exit {
                    tracing::info!(target: "actions.dispatch", "exit_requested");
                    result = DispatchResult::quit();
                }
            }
            Mode::Find => {
                self.find.handle_input(key, state);
            }
        }
        self.sync_mode(state);
        state.buffer.notify(EditorEvent::TextChanged);
        Ok(result)
    }

    /// Return to Normal once the current mode's handler deactivated.
    fn sync_mode(&self, state: &mut EditorState) {
        let finished = match state.mode {
            Mode::CommandLine => !self.command_line.is_active(),
            Mode::Find => !self.find.is_active(),
            Mode::Normal | Mode::Insert => false,
        };
        if finished {
            state.set_mode(Mode::Normal);
        }
    }

    /// Prompt to show on the status line instead of the position summary.
    pub fn prompt(&self, state: &EditorState) -> Option<Prompt> {
        match state.mode {
            Mode::CommandLine if self.command_line.is_active() => Some(Prompt {
                text: self.command_line.prompt(),
                editing: true,
            }),
            Mode::Find if self.find.is_active() => Some(Prompt {
                text: self.find.prompt(),
                editing: !self.find.is_confirmed(),
            }),
            _ => None,
        }
    }

    pub fn command_line(&self) -> &CommandLineHandler {
        &self.command_line
    }

    pub fn find(&self) -> &FindHandler {
        &self.find
    }

    fn page_rows(&self, term: &dyn TerminalBackend) -> Result<usize> {
        let (rows, _) = term.screen_size()?;
        Ok(self.config.page_rows(rows))
    }
}
