//! Line-vector text buffer with an owned, always-clamped cursor.
//!
//! `TextBuffer` is the only mutator of document text. Every public operation
//! keeps two invariants:
//! * the buffer holds at least one line;
//! * the cursor lies inside `[0, line_count) x [0, len(line)]`.
//!
//! Position errors do not exist at this layer: out-of-range requests clamp.
//! Successful mutations emit `EditorEvent::TextChanged`, pure navigation emits
//! `EditorEvent::CursorMoved`, both through the buffer's own `EventHub`.

use core_events::{EditorEvent, EventHub, EventKinds, EventListener, SubscriptionId};
use tracing::trace;

pub mod cursor;
pub mod line;

pub use cursor::Cursor;
pub use line::Line;

pub struct TextBuffer {
    lines: Vec<Line>,
    cursor: Cursor,
    modified: bool,
    events: EventHub<TextBuffer>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.lines.len())
            .field("cursor", &self.cursor)
            .field("modified", &self.modified)
            .field("events", &self.events)
            .finish()
    }
}

impl TextBuffer {
    /// Empty buffer: one empty line, cursor at the origin.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            cursor: Cursor::origin(),
            modified: false,
            events: EventHub::new(),
        }
    }

    /// Build a buffer from a sequence of lines (no event, not modified).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Line>,
    {
        let mut b = Self::new();
        b.lines = lines.into_iter().map(Into::into).collect();
        if b.lines.is_empty() {
            b.lines.push(Line::default());
        }
        b
    }

    /// Build a buffer by splitting `text` on `'\n'`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    // ---------------------------------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------------------------------

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Char length of line `idx` (0 when out of range).
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(Line::len).unwrap_or(0)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn current(&self) -> &Line {
        &self.lines[self.cursor.row()]
    }

    // ---------------------------------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------------------------------

    pub fn subscribe<L>(&mut self, kinds: EventKinds, listener: L) -> SubscriptionId
    where
        L: EventListener<TextBuffer> + 'static,
    {
        self.events.subscribe(kinds, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Broadcast `event` to subscribers.
    ///
    /// The hub is detached while delivering so subscribers can borrow the
    /// buffer immutably. Subscribers only ever see `&TextBuffer`, which rules
    /// out nested notification.
    pub fn notify(&mut self, event: EditorEvent) {
        let mut hub = std::mem::take(&mut self.events);
        hub.notify(self, &event);
        self.events = hub;
    }

    fn text_changed(&mut self) {
        self.modified = true;
        self.notify(EditorEvent::TextChanged);
    }

    fn cursor_moved(&mut self) {
        self.notify(EditorEvent::CursorMoved);
    }

    // ---------------------------------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------------------------------

    /// Insert `c` at the cursor. A newline splits the line and moves the
    /// cursor to the start of the new line.
    pub fn insert_char(&mut self, c: char) {
        let (col, row) = self.cursor.pos();
        if c == '\n' {
            let tail = self.lines[row].split_off(col);
            self.lines.insert(row + 1, tail);
            self.cursor.set(0, row + 1);
        } else {
            self.lines[row].insert_char(col, c);
            self.cursor.move_by(1, 0, &self.lines);
        }
        trace!(target: "text.buffer", op = "insert_char", ch = ?c, col, row);
        self.text_changed();
    }

    /// Backspace semantics: joins with the previous line at column 0.
    pub fn delete_char_backward(&mut self) {
        let (col, row) = self.cursor.pos();
        if col == 0 && row == 0 {
            return;
        }
        if col == 0 {
            let current = self.lines.remove(row);
            let join = self.lines[row - 1].len();
            self.lines[row - 1].append(&current);
            self.cursor.set(join, row - 1);
        } else {
            self.lines[row].remove_range(col - 1, col);
            self.cursor.set(col - 1, row);
        }
        trace!(target: "text.buffer", op = "delete_char_backward", col, row);
        self.text_changed();
    }

    /// Delete under the cursor; at end of line pulls the next line up.
    pub fn delete_char_forward(&mut self) {
        let (col, row) = self.cursor.pos();
        let len = self.lines[row].len();
        let last_row = self.lines.len() - 1;
        if col >= len && row == last_row {
            return;
        }
        if col >= len {
            let next = self.lines.remove(row + 1);
            self.lines[row].append(&next);
        } else {
            self.lines[row].remove_range(col, col + 1);
        }
        trace!(target: "text.buffer", op = "delete_char_forward", col, row);
        self.text_changed();
    }

    /// Remove the cursor's line and return its text. Removing the only line
    /// leaves a single empty line behind.
    pub fn delete_line(&mut self) -> String {
        let row = self.cursor.row();
        let removed = self.lines.remove(row);
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.cursor.clamp_to(&self.lines);
        trace!(target: "text.buffer", op = "delete_line", row, remaining = self.lines.len());
        self.text_changed();
        removed.into()
    }

    /// Empty the current line and move to its start.
    pub fn clear_line(&mut self) {
        let row = self.cursor.row();
        self.lines[row].clear();
        self.cursor.set(0, row);
        self.text_changed();
    }

    /// Delete the word under the cursor plus one trailing space.
    pub fn delete_word(&mut self) -> Option<String> {
        let (col, row) = self.cursor.pos();
        let (start, mut end) = self.word_bounds()?;
        if self.lines[row].char_at(end) == Some(' ') {
            end += 1;
        }
        let removed = self.lines[row].remove_range(start, end);
        self.cursor.set(start, row);
        trace!(target: "text.buffer", op = "delete_word", col, row, start, end);
        self.text_changed();
        Some(removed)
    }

    /// Insert `text` at the cursor without moving it. Newlines are dropped.
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let (col, row) = self.cursor.pos();
        self.lines[row].insert_str(col, text);
        trace!(target: "text.buffer", op = "paste", len = text.len(), col, row);
        self.text_changed();
    }

    /// Overwrite the char under the cursor. No-op at end of line.
    pub fn replace_char(&mut self, c: char) {
        let (col, row) = self.cursor.pos();
        if c == '\n' || col >= self.lines[row].len() {
            return;
        }
        let mut tmp = [0u8; 4];
        self.lines[row].replace_range(col, col + 1, c.encode_utf8(&mut tmp));
        self.text_changed();
    }

    // ---------------------------------------------------------------------------------------------
    // Copy
    // ---------------------------------------------------------------------------------------------

    pub fn copy_line(&self) -> String {
        self.current().as_str().to_string()
    }

    pub fn copy_word(&self) -> Option<String> {
        let (start, end) = self.word_bounds()?;
        Some(self.current().substr(start, end).to_string())
    }

    // ---------------------------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------------------------

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.cursor.move_by(dx, dy, &self.lines);
        self.cursor_moved();
    }

    /// Absolute move, clamped to the buffer extent.
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor.set(col, row);
        self.cursor.clamp_to(&self.lines);
        self.cursor_moved();
    }

    /// `(start, end)` of the space-delimited word containing the cursor, end
    /// exclusive. `None` when the cursor is on a space or past the end.
    pub fn word_bounds(&self) -> Option<(usize, usize)> {
        let col = self.cursor.col();
        let chars: Vec<char> = self.current().as_str().chars().collect();
        match chars.get(col) {
            None | Some(' ') => return None,
            Some(_) => {}
        }
        let mut start = col;
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        let mut end = col;
        while end < chars.len() && chars[end] != ' ' {
            end += 1;
        }
        Some((start, end))
    }

    pub fn str_to_start(&mut self) {
        let row = self.cursor.row();
        self.cursor.set(0, row);
        self.cursor_moved();
    }

    pub fn str_to_end(&mut self) {
        let row = self.cursor.row();
        let len = self.current().len();
        self.cursor.set(len, row);
        self.cursor_moved();
    }

    pub fn word_to_start(&mut self) {
        if let Some((start, _)) = self.word_bounds() {
            let row = self.cursor.row();
            self.cursor.set(start, row);
            self.cursor_moved();
        }
    }

    pub fn word_to_end(&mut self) {
        if let Some((_, end)) = self.word_bounds() {
            let row = self.cursor.row();
            self.cursor.set(end, row);
            self.cursor_moved();
        }
    }

    pub fn page_up(&mut self, rows: usize) {
        let row = self.cursor.row().saturating_sub(rows);
        self.cursor.set(0, row);
        self.cursor_moved();
    }

    pub fn page_down(&mut self, rows: usize) {
        let row = self
            .cursor
            .row()
            .saturating_add(rows)
            .min(self.lines.len() - 1);
        self.cursor.set(0, row);
        self.cursor_moved();
    }

    /// Literal substring search from the cursor without wraparound. Returns
    /// true and moves the cursor to the match start when found.
    pub fn search(&mut self, term: &str, forward: bool) -> bool {
        if term.is_empty() {
            return false;
        }
        let (col, row) = self.cursor.pos();
        let here = if forward {
            self.lines[row].find_from(term, col + 1)
        } else {
            self.lines[row].rfind_before(term, col)
        };
        let hit = here.map(|c| (c, row)).or_else(|| {
            if forward {
                (row + 1..self.lines.len())
                    .find_map(|r| self.lines[r].find_from(term, 0).map(|c| (c, r)))
            } else {
                (0..row)
                    .rev()
                    .find_map(|r| self.lines[r].rfind_before(term, usize::MAX).map(|c| (c, r)))
            }
        });
        trace!(target: "text.buffer", op = "search", forward, found = hit.is_some());
        match hit {
            Some((c, r)) => {
                self.cursor.set(c, r);
                self.cursor_moved();
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Whole-buffer replacement
    // ---------------------------------------------------------------------------------------------

    /// Replace the whole content. Cursor returns to the origin and the
    /// buffer is considered clean.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Line>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.cursor = Cursor::origin();
        self.modified = false;
        trace!(target: "text.buffer", op = "load", lines = self.lines.len());
        self.notify(EditorEvent::TextChanged);
    }

    /// Snapshot of the content for persistence. Call `mark_saved` once the
    /// write succeeded.
    pub fn save(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.as_str().to_string()).collect()
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}
