//! Error types for persistence and colon-command execution.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing a buffer file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure parsing or executing a colon command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid argument for {command}: {value}")]
    InvalidArgument { command: String, value: String },

    #[error("no write since last change (use q! to force)")]
    UnsavedChanges,

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            CommandError::UnknownCommand("zz".into()).to_string(),
            "unknown command: zz"
        );
        let e = CommandError::from(PersistError::NotFound(PathBuf::from("a.txt")));
        assert_eq!(e.to_string(), "file not found: a.txt");
        let e = CommandError::InvalidArgument {
            command: "number".into(),
            value: "x".into(),
        };
        assert_eq!(e.to_string(), "invalid argument for number: x");
    }
}
