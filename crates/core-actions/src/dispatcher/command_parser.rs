//! Structured command line parsing.
//!
//! Converts the raw command buffer (typed after `:`) into a `ParsedCommand`.
//! Tokenization splits on spaces outside double quotes; quote characters are
//! kept verbatim inside the token and empty tokens are dropped. Parsing is
//! pure: no IO, no state access.

use std::path::PathBuf;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Blank command line.
    Empty,
    /// `w <file>`
    WriteTo(PathBuf),
    /// `w`
    Write,
    /// `o <file>`
    Open(PathBuf),
    /// `wq!` or `x`
    WriteQuit,
    /// `q!`
    ForceQuit,
    /// `q`
    Quit,
    /// `number <N>`, 1-based.
    GotoLine(usize),
    /// `h`
    Help,
}

/// Split `raw` on spaces that are not inside a double-quoted run.
pub fn tokenize(raw: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            ' ' if !in_quotes => {
                if start < i {
                    tokens.push(&raw[start..i]);
                }
                start = i + 1;
            }
            '"' => in_quotes = !in_quotes,
            _ => {}
        }
    }
    if start < raw.len() {
        tokens.push(&raw[start..]);
    }
    tokens
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> Result<ParsedCommand, CommandError> {
        let tokens = tokenize(raw);
        let Some((&head, args)) = tokens.split_first() else {
            return Ok(ParsedCommand::Empty);
        };
        let cmd = match (head, args) {
            ("w", [file, ..]) => ParsedCommand::WriteTo(PathBuf::from(*file)),
            ("o", [file, ..]) => ParsedCommand::Open(PathBuf::from(*file)),
            ("w", []) => ParsedCommand::Write,
            ("wq!" | "x", []) => ParsedCommand::WriteQuit,
            ("q!", []) => ParsedCommand::ForceQuit,
            ("q", []) => ParsedCommand::Quit,
            ("h", []) => ParsedCommand::Help,
            ("number", [n, ..]) => {
                let line = n.parse::<usize>().map_err(|_| CommandError::InvalidArgument {
                    command: head.to_string(),
                    value: n.to_string(),
                })?;
                ParsedCommand::GotoLine(line)
            }
            _ => return Err(CommandError::UnknownCommand(raw.trim().to_string())),
        };
        Ok(cmd)
    }
}
