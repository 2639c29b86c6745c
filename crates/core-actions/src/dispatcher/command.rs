//! Command line editing & execution (`:w`, `:o`, `:q`, `:number`, ...).
//!
//! The handler collects the text typed after `:` and runs it on Enter.
//! Whatever the outcome it deactivates and clears its buffer; failures are
//! reported through the one-shot status message as `Command error: <msg>`
//! and never escape this module.

use std::path::{Path, PathBuf};

use core_events::{EditorEvent, Key};
use core_state::EditorState;

use super::command_parser::{CommandParser, ParsedCommand};
use crate::error::CommandError;
use crate::handler::{InputOutcome, LineEdit, ModalInputHandler, edit_line};
use crate::io_ops;

#[derive(Debug)]
pub struct CommandLineHandler {
    buffer: String,
    active: bool,
    help_path: PathBuf,
}

impl CommandLineHandler {
    pub fn new(help_path: impl Into<PathBuf>) -> Self {
        Self {
            buffer: String::new(),
            active: false,
            help_path: help_path.into(),
        }
    }

    fn execute(&mut self, state: &mut EditorState) -> InputOutcome {
        let raw = std::mem::take(&mut self.buffer);
        tracing::debug!(target: "actions.command", cmd = %raw, "execute");
        let result = CommandParser::parse(&raw).and_then(|cmd| self.run(cmd, state));
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(target: "actions.command", cmd = %raw, error = %e, "command_failed");
                state.set_message(format!("Command error: {e}"));
                InputOutcome::Continue
            }
        }
    }

    fn run(
        &self,
        cmd: ParsedCommand,
        state: &mut EditorState,
    ) -> Result<InputOutcome, CommandError> {
        match cmd {
            ParsedCommand::Empty => {}
            ParsedCommand::WriteTo(path) => {
                save_to(&path, state)?;
                state.file_name = Some(path);
            }
            ParsedCommand::Open(path) => {
                open_from(&path, state)?;
                state.file_name = Some(path);
            }
            ParsedCommand::Write => {
                if let Some(path) = state.file_name.clone() {
                    save_to(&path, state)?;
                }
            }
            ParsedCommand::WriteQuit => {
                if let Some(path) = state.file_name.clone() {
                    save_to(&path, state)?;
                }
                return Ok(InputOutcome::Exit);
            }
            ParsedCommand::ForceQuit => return Ok(InputOutcome::Exit),
            ParsedCommand::Quit => {
                if state.buffer.is_modified() {
                    return Err(CommandError::UnsavedChanges);
                }
                return Ok(InputOutcome::Exit);
            }
            ParsedCommand::GotoLine(n) => state.buffer.set_cursor(0, n.saturating_sub(1)),
            ParsedCommand::Help => open_from(&self.help_path, state)?,
        }
        Ok(InputOutcome::Continue)
    }
}

fn save_to(path: &Path, state: &mut EditorState) -> Result<(), CommandError> {
    io_ops::save(path, &state.buffer.save())?;
    state.buffer.mark_saved();
    state
        .buffer
        .notify(EditorEvent::FileSaved(path.to_path_buf()));
    Ok(())
}

fn open_from(path: &Path, state: &mut EditorState) -> Result<(), CommandError> {
    let lines = io_ops::load(path)?;
    state.buffer.load(lines);
    state
        .buffer
        .notify(EditorEvent::FileOpened(path.to_path_buf()));
    Ok(())
}

impl ModalInputHandler for CommandLineHandler {
    fn activate(&mut self) {
        self.active = true;
        self.buffer.clear();
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.buffer.clear();
    }

    fn handle_input(&mut self, key: Key, state: &mut EditorState) -> InputOutcome {
        match edit_line(&mut self.buffer, key) {
            LineEdit::Cancel => {
                self.deactivate();
                InputOutcome::Continue
            }
            LineEdit::Submit => {
                let outcome = self.execute(state);
                self.deactivate();
                outcome
            }
            LineEdit::Edited | LineEdit::Ignored => InputOutcome::Continue,
        }
    }

    fn buffer(&self) -> &str {
        &self.buffer
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn prompt_char(&self) -> char {
        ':'
    }
}
