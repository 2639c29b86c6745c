//! Clamped (column, row) cursor.

use crate::Line;

/// A cursor position expressed as (column, row), both 0-based char units.
///
/// Invariant (after any public mutation through `TextBuffer`):
/// `row < line_count` and `col <= len(line[row])`. The column may sit one
/// past the last character; append semantics rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    col: usize,
    row: usize,
}

impl Cursor {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    pub fn origin() -> Self {
        Self { col: 0, row: 0 }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// `(col, row)` tuple.
    pub fn pos(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub(crate) fn set(&mut self, col: usize, row: usize) {
        self.col = col;
        self.row = row;
    }

    /// Relative move. The row is resolved first so the column clamps against
    /// the destination line.
    pub(crate) fn move_by(&mut self, dx: isize, dy: isize, lines: &[Line]) {
        let last_row = lines.len().saturating_sub(1);
        let row = self.row.saturating_add_signed(dy).min(last_row);
        let max_col = lines.get(row).map(Line::len).unwrap_or(0);
        let col = self.col.saturating_add_signed(dx).min(max_col);
        self.set(col, row);
    }

    /// Pull the cursor back inside the buffer extent.
    pub(crate) fn clamp_to(&mut self, lines: &[Line]) {
        if lines.is_empty() {
            self.set(0, 0);
            return;
        }
        if self.row >= lines.len() {
            self.row = lines.len() - 1;
        }
        let max_len = lines[self.row].len();
        if self.col > max_len {
            self.col = max_len;
        }
    }
}
