//! Wrapped-row layout and vertical scrolling.
//!
//! A buffer line of `len` chars occupies `len / width + 1` screen rows
//! ("virtual rows"); the cursor may sit one past the last char, which is why
//! a line of exactly `width` chars still takes two rows. The mapper keeps a
//! wrap table rebuilt from the buffer's line lengths before every frame and
//! a scroll offset (topmost visible virtual row) that follows the cursor.
//!
//! Guarantees:
//! * `virtual_to_real(real_to_virtual(p)) == Some(p)` for every position
//!   inside the buffer, including the column one past a line's end.
//! * The status line is not part of the visible height: `visible_height`
//!   is the screen height minus one.

use core_text::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WrapEntry {
    wraps: usize,
    start_virtual: usize,
}

#[derive(Debug, Clone)]
pub struct ViewportMapper {
    width: usize,
    rows: usize,
    table: Vec<WrapEntry>,
    total: usize,
    offset: usize,
}

impl Default for ViewportMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportMapper {
    /// Empty 1x1 layout; call `rebuild` before mapping.
    pub fn new() -> Self {
        Self {
            width: 1,
            rows: 1,
            table: Vec::new(),
            total: 0,
            offset: 0,
        }
    }

    /// Recompute the wrap table for `line_lens` on a `width x rows` screen.
    /// A zero width is treated as one column.
    pub fn rebuild<I>(&mut self, line_lens: I, width: u16, rows: u16)
    where
        I: IntoIterator<Item = usize>,
    {
        self.width = usize::from(width).max(1);
        self.rows = usize::from(rows);
        self.table.clear();
        let mut total = 0;
        for len in line_lens {
            let wraps = len / self.width + 1;
            self.table.push(WrapEntry {
                wraps,
                start_virtual: total,
            });
            total += wraps;
        }
        self.total = total;
        tracing::trace!(
            target: "render",
            width = self.width,
            rows = self.rows,
            lines = self.table.len(),
            total,
            "wrap_table"
        );
    }

    pub fn rebuild_for(&mut self, buffer: &TextBuffer, width: u16, rows: u16) {
        self.rebuild(buffer.lines().iter().map(|l| l.len()), width, rows);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Screen rows available for text (status line excluded).
    pub fn visible_height(&self) -> usize {
        self.rows.saturating_sub(1)
    }

    pub fn total_virtual_rows(&self) -> usize {
        self.total
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    pub fn reset_scroll(&mut self) {
        self.offset = 0;
    }

    /// Map a buffer position to `(vcol, vrow)`. Rows outside the table map
    /// to the origin.
    pub fn real_to_virtual(&self, col: usize, row: usize) -> (usize, usize) {
        match self.table.get(row) {
            Some(entry) => (col % self.width, entry.start_virtual + col / self.width),
            None => (0, 0),
        }
    }

    /// Inverse of `real_to_virtual`; `None` past the last virtual row.
    pub fn virtual_to_real(&self, vcol: usize, vrow: usize) -> Option<(usize, usize)> {
        if vrow >= self.total {
            return None;
        }
        // First entry whose span ends after `vrow`.
        let row = self
            .table
            .partition_point(|e| e.start_virtual + e.wraps <= vrow);
        let entry = self.table.get(row)?;
        Some(((vrow - entry.start_virtual) * self.width + vcol, row))
    }

    /// Adjust the scroll offset so the cursor's virtual row stays on screen.
    pub fn follow_cursor(&mut self, col: usize, row: usize) {
        let (_, vrow) = self.real_to_virtual(col, row);
        let visible = self.visible_height();
        let before = self.offset;
        if vrow < self.offset || visible < 2 {
            self.offset = vrow;
        } else if vrow >= self.offset + visible - 1 {
            // Cursor lands on the second-to-last visible row.
            self.offset = vrow + 2 - visible;
        }
        if before != self.offset {
            tracing::trace!(target: "render", from = before, to = self.offset, "scroll");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(lens: &[usize], width: u16, rows: u16) -> ViewportMapper {
        let mut m = ViewportMapper::new();
        m.rebuild(lens.iter().copied(), width, rows);
        m
    }

    #[test]
    fn wrap_counts_include_cursor_cell() {
        let m = mapper(&[0, 9, 10, 25], 10, 5);
        // 1 + 1 + 2 + 3
        assert_eq!(m.total_virtual_rows(), 7);
        assert_eq!(m.real_to_virtual(0, 2), (0, 2));
        assert_eq!(m.real_to_virtual(10, 2), (0, 3));
        assert_eq!(m.real_to_virtual(23, 3), (3, 6));
    }

    #[test]
    fn virtual_to_real_inverts() {
        let m = mapper(&[3, 25, 0], 10, 5);
        assert_eq!(m.virtual_to_real(0, 0), Some((0, 0)));
        assert_eq!(m.virtual_to_real(4, 3), Some((24, 1)));
        assert_eq!(m.virtual_to_real(0, 4), Some((0, 2)));
        assert_eq!(m.virtual_to_real(0, 5), None);
    }

    #[test]
    fn zero_width_is_one_column() {
        let m = mapper(&[3], 0, 5);
        assert_eq!(m.width(), 1);
        assert_eq!(m.total_virtual_rows(), 4);
        assert_eq!(m.real_to_virtual(2, 0), (0, 2));
    }

    #[test]
    fn out_of_table_row_maps_to_origin() {
        let m = mapper(&[5], 10, 5);
        assert_eq!(m.real_to_virtual(3, 7), (0, 0));
    }

    #[test]
    fn scrolls_down_to_second_to_last_row_and_back_up() {
        // 6 rows: 5 for text, 1 for status.
        let mut m = mapper(&[1; 20], 80, 6);
        assert_eq!(m.visible_height(), 5);
        m.follow_cursor(0, 3);
        assert_eq!(m.scroll_offset(), 0);
        m.follow_cursor(0, 4);
        assert_eq!(m.scroll_offset(), 1);
        assert_eq!(4 - m.scroll_offset(), 3);
        m.follow_cursor(0, 12);
        assert_eq!(m.scroll_offset(), 9);
        m.follow_cursor(0, 2);
        assert_eq!(m.scroll_offset(), 2);
        m.reset_scroll();
        assert_eq!(m.scroll_offset(), 0);
    }

    #[test]
    fn tiny_screen_pins_cursor_row_to_top() {
        let mut m = mapper(&[1; 5], 80, 2);
        m.follow_cursor(0, 3);
        assert_eq!(m.scroll_offset(), 3);
        m.follow_cursor(0, 1);
        assert_eq!(m.scroll_offset(), 1);
    }
}
