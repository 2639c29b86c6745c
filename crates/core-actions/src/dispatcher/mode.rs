//! Mode transition handling.
//!
//! Normal is the hub: Insert is entered through `i I A S`, the command line
//! through `:` and find through `/` or `?`. Leaving a sub-handler mode is
//! driven by the handler deactivating itself (see `ModalDispatcher::sync_mode`).

use core_state::{EditorState, Mode};

use super::ModalDispatcher;
use crate::handler::ModalInputHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModeChange {
    /// `i`
    Insert,
    /// `I`: line start first.
    InsertAtLineStart,
    /// `A`: line end first.
    AppendAtLineEnd,
    /// `S`: line cleared first.
    SubstituteLine,
    /// `:`
    CommandLine,
    /// `/` (true) or `?` (false).
    Find { forward: bool },
    /// Esc from Insert.
    LeaveInsert,
}

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    dispatcher: &mut ModalDispatcher,
    state: &mut EditorState,
) {
    match mc {
        ModeChange::Insert => state.set_mode(Mode::Insert),
        ModeChange::InsertAtLineStart => {
            state.buffer.str_to_start();
            state.set_mode(Mode::Insert);
        }
        ModeChange::AppendAtLineEnd => {
            state.buffer.str_to_end();
            state.set_mode(Mode::Insert);
        }
        ModeChange::SubstituteLine => {
            state.buffer.clear_line();
            state.set_mode(Mode::Insert);
        }
        ModeChange::CommandLine => {
            dispatcher.command_line.activate();
            state.set_mode(Mode::CommandLine);
        }
        ModeChange::Find { forward } => {
            dispatcher.find.begin(forward);
            state.set_mode(Mode::Find);
        }
        ModeChange::LeaveInsert => state.set_mode(Mode::Normal),
    }
}
