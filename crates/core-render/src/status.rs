//! Status line composition.
//!
//! Two shapes:
//! * `<mode> | Line: <row+1> Col: <col+1>` while no prompt is open.
//! * the prompt text (`:w out.txt`, `/foo`, `?bar`) while the command line
//!   or find is active.
//!
//! A one-shot message (command error, failed search) is appended to either
//! shape after ` | `.

use std::fmt::Write as _;

use core_state::Mode;

/// What the status line needs to know about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub row: usize, // 0-based
    pub col: usize, // 0-based
    pub message: Option<&'a str>,
    /// Replaces the position summary when present.
    pub prompt: Option<&'a str>,
}

pub fn format_status(ctx: &StatusContext<'_>) -> String {
    let mut s = String::with_capacity(48);
    match ctx.prompt {
        Some(prompt) => s.push_str(prompt),
        None => {
            let _ = write!(
                s,
                "{} | Line: {} Col: {}",
                ctx.mode.as_str(),
                ctx.row + 1,
                ctx.col + 1
            );
        }
    }
    if let Some(msg) = ctx.message {
        s.push_str(" | ");
        s.push_str(msg);
    }
    s
}
