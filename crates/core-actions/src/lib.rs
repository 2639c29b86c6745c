//! Key handling for ved: the modal dispatcher, the command-line and find
//! handlers, and the file IO they drive.
//!
//! The run loop hands each decoded `Key` to `ModalDispatcher::handle_key`
//! together with the session `EditorState` and the terminal (used by `r`
//! to read its argument and by page motions to size a page). Exit is a
//! value: `DispatchResult::quit`.

pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod io_ops;

pub use dispatcher::{
    CommandLineHandler, CommandParser, DispatchResult, FindHandler, ModalDispatcher,
    ParsedCommand, Prompt, tokenize,
};
pub use error::{CommandError, PersistError};
pub use handler::{InputOutcome, ModalInputHandler};
