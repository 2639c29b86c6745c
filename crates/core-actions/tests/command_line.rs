mod common;

use common::Session;
use core_actions::ModalInputHandler;
use core_events::{EditorEvent, EventKinds, Key};
use core_state::Mode;
use core_text::TextBuffer;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn write_then_open_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.txt");
    let p = path.display().to_string();

    let mut s = Session::new(&["first line", "", "  indented", "last"]);
    let before = s.lines();
    s.command(&format!("w {p}"));
    assert!(!s.state.buffer.is_modified());
    assert_eq!(s.state.file_name.as_deref(), Some(path.as_path()));

    s.send("dd").send("dd");
    assert_ne!(s.lines(), before);
    s.command(&format!("o {p}"));
    assert_eq!(s.lines(), before);
    assert_eq!(s.cursor(), (0, 0));
    assert!(!s.state.buffer.is_modified());
    assert_eq!(s.mode(), Mode::Normal);
}

#[test]
fn plain_w_saves_to_remembered_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut s = Session::new(&["a"]);
    s.command(&format!("w {}", path.display()));
    s.send("Ab").key(Key::Esc);
    s.command("w");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab\n");
    assert!(!s.state.buffer.is_modified());
}

#[test]
fn q_with_unsaved_changes_does_not_quit() {
    let mut s = Session::new(&["a"]);
    s.send("x");
    s.command("q");
    assert!(!s.quit);
    assert_eq!(s.mode(), Mode::Normal);
    assert!(
        s.state
            .message
            .as_deref()
            .is_some_and(|m| m.starts_with("Command error: "))
    );
    s.command("q!");
    assert!(s.quit);
}

#[test]
fn q_on_clean_buffer_quits() {
    let mut s = Session::new(&["a"]);
    s.command("q");
    assert!(s.quit);
}

#[test]
fn x_saves_then_quits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut s = Session::new(&["keep me"]);
    s.command(&format!("w {}", path.display()));
    s.send("x");
    s.command("x");
    assert!(s.quit);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "eep me\n");
}

#[test]
fn failed_save_blocks_wq() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no").join("such").join("file.txt");
    let mut s = Session::new(&["a"]);
    s.state.file_name = Some(missing.clone());
    s.command("wq!");
    assert!(!s.quit);
    assert!(s.state.message.is_some());
    s.command(&format!("w {}", dir.path().join("other.txt").display()));
    assert!(s.state.message.is_none());
    assert_eq!(s.state.file_name, Some(dir.path().join("other.txt")));
}

#[test]
fn open_missing_file_reports_error_and_keeps_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let mut s = Session::new(&["still here"]);
    s.command(&format!("o {}", missing.display()));
    assert_eq!(s.lines(), vec!["still here"]);
    let msg = s.state.message.clone().unwrap_or_default();
    assert!(msg.starts_with("Command error: file not found"), "{msg}");
}

#[test]
fn number_command_and_unknown_command() {
    let mut s = Session::new(&["a", "b", "c"]);
    s.command("number 3");
    assert_eq!(s.cursor(), (0, 2));
    s.command("frobnicate");
    assert_eq!(
        s.state.message.as_deref(),
        Some("Command error: unknown command: frobnicate")
    );
    assert!(!s.dispatcher.command_line().is_active());
}

#[test]
fn backspace_edits_command_buffer() {
    let mut s = Session::new(&["a", "b"]);
    s.send(":number 22").key(Key::Backspace);
    assert_eq!(s.dispatcher.command_line().buffer(), "number 2");
    s.key(Key::Enter);
    assert_eq!(s.cursor(), (0, 1));
}

#[test]
fn save_and_open_emit_file_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ev.txt");
    let seen: Rc<RefCell<Vec<EditorEvent>>> = Rc::default();
    let mut s = Session::new(&["a"]);
    let sink = seen.clone();
    s.state.buffer.subscribe(
        EventKinds::FILE_SAVED | EventKinds::FILE_OPENED,
        move |_: &TextBuffer, e: &EditorEvent| sink.borrow_mut().push(e.clone()),
    );
    s.command(&format!("w {}", path.display()));
    s.command(&format!("o {}", path.display()));
    assert_eq!(
        *seen.borrow(),
        vec![
            EditorEvent::FileSaved(path.clone()),
            EditorEvent::FileOpened(path.clone()),
        ]
    );
}
