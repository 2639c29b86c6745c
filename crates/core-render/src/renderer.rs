//! Full-frame renderer: wrapped text rows plus the status line.
//!
//! Every frame rebuilds the wrap table from the buffer, scrolls the viewport
//! to keep the cursor visible, clears the screen and redraws it. Buffers are
//! small enough that partial repaint is not worth the bookkeeping.

use anyhow::Result;
use core_terminal::TerminalBackend;
use core_text::TextBuffer;

use crate::status::{StatusContext, format_status};
use crate::viewport::ViewportMapper;

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[derive(Debug, Default)]
pub struct Renderer {
    viewport: ViewportMapper,
    frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &ViewportMapper {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportMapper {
        &mut self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw one frame. With `cursor_on_prompt` the terminal cursor is parked
    /// after the prompt text instead of at the buffer cursor.
    pub fn render(
        &mut self,
        term: &mut dyn TerminalBackend,
        buffer: &TextBuffer,
        status: &StatusContext<'_>,
        cursor_on_prompt: bool,
    ) -> Result<()> {
        let (rows, cols) = term.screen_size()?;
        let (cur_col, cur_row) = buffer.cursor().pos();
        self.viewport.rebuild_for(buffer, cols, rows);
        self.viewport.follow_cursor(cur_col, cur_row);

        term.clear_screen()?;
        let width = self.viewport.width();
        let offset = self.viewport.scroll_offset();
        let visible = self.viewport.visible_height();
        for screen_row in 0..visible {
            let Some((start, row)) = self.viewport.virtual_to_real(0, offset + screen_row) else {
                break;
            };
            if let Some(line) = buffer.line(row) {
                let text = line.substr(start, start + width);
                if !text.is_empty() {
                    term.write_text(to_u16(screen_row), 0, text)?;
                }
            }
        }

        if rows > 0 {
            let status_row = rows - 1;
            let text: String = format_status(status)
                .chars()
                .take(usize::from(cols))
                .collect();
            term.write_text(status_row, 0, &text)?;

            if cursor_on_prompt {
                let col = status.prompt.map_or(0, |p| p.chars().count());
                term.move_cursor(status_row, to_u16(col.min(usize::from(cols).saturating_sub(1))))?;
            } else {
                let (vcol, vrow) = self.viewport.real_to_virtual(cur_col, cur_row);
                if (offset..offset + visible).contains(&vrow) {
                    term.move_cursor(to_u16(vrow - offset), to_u16(vcol))?;
                }
            }
        }

        term.refresh()?;
        self.frames += 1;
        tracing::trace!(target: "render", frame = self.frames, offset, "frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Mode;
    use core_terminal::HeadlessBackend;

    fn status(prompt: Option<&str>) -> StatusContext<'_> {
        StatusContext {
            mode: Mode::Normal,
            row: 0,
            col: 0,
            message: None,
            prompt,
        }
    }

    #[test]
    fn draws_text_and_status() {
        let buf = TextBuffer::from_lines(["hello", "world"]);
        let mut term = HeadlessBackend::new(4, 20);
        let mut r = Renderer::new();
        r.render(&mut term, &buf, &status(None), false).unwrap();
        assert_eq!(
            term.screen(),
            vec!["hello", "world", "", "normal | Line: 1 Col: 1"]
        );
        assert_eq!(term.cursor(), (0, 0));
        assert_eq!(term.refresh_count(), 1);
        assert_eq!(r.frames(), 1);
    }

    #[test]
    fn cursor_goes_to_prompt_while_editing() {
        let buf = TextBuffer::from_lines(["abc"]);
        let mut term = HeadlessBackend::new(4, 20);
        let mut r = Renderer::new();
        r.render(&mut term, &buf, &status(Some(":wq")), true).unwrap();
        assert_eq!(term.row_text(3), ":wq");
        assert_eq!(term.cursor(), (3, 3));
    }

    #[test]
    fn status_is_clipped_to_width() {
        let buf = TextBuffer::new();
        let mut term = HeadlessBackend::new(2, 6);
        let mut r = Renderer::new();
        r.render(&mut term, &buf, &status(None), false).unwrap();
        assert_eq!(term.row_text(1), "normal");
    }
}
