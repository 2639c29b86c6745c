use core_events::Key;
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into a logical `Key`.
///
/// Returns `None` for release events. Chords with Ctrl/Alt and keys the
/// editor does not bind collapse into `Key::Other`.
pub fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    if event
        .modifiers
        .intersects(CKeyModifiers::CONTROL | CKeyModifiers::ALT)
    {
        return Some(Key::Other);
    }
    let key = match event.code {
        CKeyCode::Char(c) => Key::Char(c),
        CKeyCode::Enter => Key::Enter,
        CKeyCode::Esc => Key::Esc,
        CKeyCode::Backspace => Key::Backspace,
        CKeyCode::Left => Key::Left,
        CKeyCode::Right => Key::Right,
        CKeyCode::Up => Key::Up,
        CKeyCode::Down => Key::Down,
        CKeyCode::PageUp => Key::PageUp,
        CKeyCode::PageDown => Key::PageDown,
        _ => Key::Other,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: CKeyCode) -> CKeyEvent {
        CKeyEvent::new(code, CKeyModifiers::NONE)
    }

    #[test]
    fn maps_named_keys() {
        assert_eq!(map_key_event(&press(CKeyCode::Esc)), Some(Key::Esc));
        assert_eq!(map_key_event(&press(CKeyCode::Enter)), Some(Key::Enter));
        assert_eq!(map_key_event(&press(CKeyCode::PageDown)), Some(Key::PageDown));
        assert_eq!(map_key_event(&press(CKeyCode::Char('q'))), Some(Key::Char('q')));
        assert_eq!(map_key_event(&press(CKeyCode::F(2))), Some(Key::Other));
    }

    #[test]
    fn shifted_chars_pass_through() {
        let ev = CKeyEvent::new(CKeyCode::Char('G'), CKeyModifiers::SHIFT);
        assert_eq!(map_key_event(&ev), Some(Key::Char('G')));
    }

    #[test]
    fn ctrl_chords_are_unbound() {
        let ev = CKeyEvent::new(CKeyCode::Char('c'), CKeyModifiers::CONTROL);
        assert_eq!(map_key_event(&ev), Some(Key::Other));
    }

    #[test]
    fn release_events_are_skipped() {
        let mut ev = press(CKeyCode::Char('a'));
        ev.kind = CKeyEventKind::Release;
        assert_eq!(map_key_event(&ev), None);
    }
}
