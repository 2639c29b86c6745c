//! File IO helpers used by the command line.
//!
//! Synchronous and line oriented: `load` yields one `String` per line with
//! `\n` / `\r\n` terminators stripped, `save` writes every line followed by
//! `\n`. A file that ended without a newline gains one on save.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::PersistError;

/// Read `path` into lines.
pub fn load(path: &Path) -> Result<Vec<String>, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(target: "io", path = %path.display(), ?e, "file_open_error");
        if e.kind() == io::ErrorKind::NotFound {
            PersistError::NotFound(path.to_path_buf())
        } else {
            PersistError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    tracing::info!(target: "io", path = %path.display(), lines = lines.len(), "file_loaded");
    Ok(lines)
}

/// Write `lines` to `path`, replacing any existing content.
pub fn save(path: &Path, lines: &[String]) -> Result<(), PersistError> {
    write_lines(path, lines).map_err(|e| {
        tracing::error!(target: "io", path = %path.display(), ?e, "file_write_error");
        PersistError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    tracing::info!(target: "io", path = %path.display(), lines = lines.len(), "file_saved");
    Ok(())
}

fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_strips_crlf_and_lf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "line1\r\nline2\nline3").unwrap();
        assert_eq!(load(&path).unwrap(), vec!["line1", "line2", "line3"]);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(load(&path), Err(PersistError::NotFound(p)) if p == path));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let lines = vec!["a".to_string(), String::new(), "c d".to_string()];
        save(&path, &lines).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n\nc d\n");
        assert_eq!(load(&path).unwrap(), lines);
    }

    #[test]
    fn save_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(
            save(&path, &["x".to_string()]),
            Err(PersistError::Io { .. })
        ));
    }
}
