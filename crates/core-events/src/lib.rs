//! Core event types for ved: decoded key input and the typed buffer event hub.
//!
//! Two concerns live here because every other crate depends on them and they
//! depend on nothing editor-specific:
//! * `Key`: the logical key identity produced by a terminal backend and
//!   consumed by the modal dispatcher.
//! * `EventHub`: synchronous publish/subscribe of `EditorEvent`s. Subscribers
//!   register for a set of `EventKinds` and are invoked in registration order.
//!
//! Delivery contract:
//! * Notification is synchronous; `notify` returns after every interested
//!   subscriber ran.
//! * Subscribers receive the source by shared reference. The owner of the hub
//!   detaches it while delivering (see `core-text`), so a subscriber cannot
//!   mutate the source or raise a nested notification.

use std::fmt;
use std::path::PathBuf;

// -------------------------------------------------------------------------------------------------
// Key input
// -------------------------------------------------------------------------------------------------

/// Logical key identity. Printable input arrives as `Char`; everything the
/// editor does not bind collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    /// The terminal was resized; carries no input but forces a redraw.
    Resize,
    Other,
}

impl Key {
    pub const ESC_CODE: u32 = 27;
    pub const ENTER_CODE: u32 = 10;
    pub const BACKSPACE_CODE: u32 = 8;

    /// Decode a raw curses-style key code. Used by scripted input and tests;
    /// arrow and page keys have no portable raw code and map to `Other`.
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::ESC_CODE => Key::Esc,
            Self::ENTER_CODE | 13 => Key::Enter,
            Self::BACKSPACE_CODE | 127 => Key::Backspace,
            c if c >= 32 => char::from_u32(c).map(Key::Char).unwrap_or(Key::Other),
            _ => Key::Other,
        }
    }

    /// Printable character carried by this key, if any.
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            other => write!(f, "<{other:?}>"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Buffer events
// -------------------------------------------------------------------------------------------------

bitflags::bitflags! {
    /// Subscription mask. A subscriber receives an event when the event's kind
    /// intersects the mask it registered with.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        const TEXT_CHANGED = 0b0001;
        const CURSOR_MOVED = 0b0010;
        const FILE_OPENED  = 0b0100;
        const FILE_SAVED   = 0b1000;
    }
}

/// Closed set of notifications broadcast by the text buffer and its callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer content changed (or a redraw was requested unconditionally).
    TextChanged,
    /// Cursor moved without a content change.
    CursorMoved,
    /// A file was loaded into the buffer.
    FileOpened(PathBuf),
    /// The buffer was written to a file.
    FileSaved(PathBuf),
}

impl EditorEvent {
    pub fn kind(&self) -> EventKinds {
        match self {
            EditorEvent::TextChanged => EventKinds::TEXT_CHANGED,
            EditorEvent::CursorMoved => EventKinds::CURSOR_MOVED,
            EditorEvent::FileOpened(_) => EventKinds::FILE_OPENED,
            EditorEvent::FileSaved(_) => EventKinds::FILE_SAVED,
        }
    }
}

/// Typed subscriber interface. `S` is the event source handed to the
/// subscriber so it can read state without holding its own reference.
pub trait EventListener<S: ?Sized> {
    fn on_event(&mut self, source: &S, event: &EditorEvent);
}

impl<S: ?Sized, F> EventListener<S> for F
where
    F: FnMut(&S, &EditorEvent),
{
    fn on_event(&mut self, source: &S, event: &EditorEvent) {
        self(source, event)
    }
}

/// Handle returned by `EventHub::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<S: ?Sized> {
    id: SubscriptionId,
    kinds: EventKinds,
    listener: Box<dyn EventListener<S>>,
}

/// Ordered subscriber registry for one event source.
pub struct EventHub<S: ?Sized> {
    next_id: u64,
    subscribers: Vec<Subscriber<S>>,
}

impl<S: ?Sized> Default for EventHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for EventHub<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S: ?Sized> EventHub<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register `listener` for every event whose kind intersects `kinds`.
    pub fn subscribe<L>(&mut self, kinds: EventKinds, listener: L) -> SubscriptionId
    where
        L: EventListener<S> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kinds,
            listener: Box::new(listener),
        });
        tracing::trace!(target: "events", id = id.0, kinds = ?kinds, "subscribe");
        id
    }

    /// Remove a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver `event` to interested subscribers in registration order.
    pub fn notify(&mut self, source: &S, event: &EditorEvent) {
        let kind = event.kind();
        for sub in self.subscribers.iter_mut() {
            if sub.kinds.intersects(kind) {
                sub.listener.on_event(source, event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn key_from_code_maps_control_keys() {
        assert_eq!(Key::from_code(27), Key::Esc);
        assert_eq!(Key::from_code(10), Key::Enter);
        assert_eq!(Key::from_code(8), Key::Backspace);
        assert_eq!(Key::from_code(u32::from(b'x')), Key::Char('x'));
        assert_eq!(Key::from_code(3), Key::Other);
    }

    #[test]
    fn printable_excludes_control_chars() {
        assert_eq!(Key::Char('a').printable(), Some('a'));
        assert_eq!(Key::Char('\t').printable(), None);
        assert_eq!(Key::Esc.printable(), None);
    }

    #[test]
    fn hub_filters_by_kind_and_preserves_order() {
        let seen: Rc<RefCell<Vec<(u8, EditorEvent)>>> = Rc::default();
        let mut hub: EventHub<()> = EventHub::new();
        let a = seen.clone();
        hub.subscribe(EventKinds::TEXT_CHANGED, move |_: &(), e: &EditorEvent| {
            a.borrow_mut().push((1, e.clone()))
        });
        let b = seen.clone();
        hub.subscribe(
            EventKinds::TEXT_CHANGED | EventKinds::CURSOR_MOVED,
            move |_: &(), e: &EditorEvent| b.borrow_mut().push((2, e.clone())),
        );
        hub.notify(&(), &EditorEvent::TextChanged);
        hub.notify(&(), &EditorEvent::CursorMoved);
        assert_eq!(
            *seen.borrow(),
            vec![
                (1, EditorEvent::TextChanged),
                (2, EditorEvent::TextChanged),
                (2, EditorEvent::CursorMoved),
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut hub: EventHub<()> = EventHub::new();
        let c = count.clone();
        let id = hub.subscribe(EventKinds::all(), move |_: &(), _: &EditorEvent| {
            *c.borrow_mut() += 1
        });
        hub.notify(&(), &EditorEvent::TextChanged);
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.notify(&(), &EditorEvent::TextChanged);
        assert_eq!(*count.borrow(), 1);
        assert!(hub.is_empty());
    }

    #[test]
    fn file_events_carry_path() {
        let ev = EditorEvent::FileSaved(PathBuf::from("a.txt"));
        assert_eq!(ev.kind(), EventKinds::FILE_SAVED);
    }
}
