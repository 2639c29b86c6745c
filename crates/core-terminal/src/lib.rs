//! Terminal backend abstraction and its two implementations.
//!
//! `TerminalBackend` is the only seam between the editor core and the
//! screen/keyboard. `CrosstermBackend` drives a real terminal; the
//! `HeadlessBackend` replays scripted keys against an in-memory grid so the
//! dispatcher and renderer can be exercised without a TTY.
//!
//! Coordinates passed to the drawing methods are `(row, col)`, 0-based,
//! matching the order the renderer iterates the screen in.

use anyhow::Result;
use core_events::Key;
use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{Write, stdout};

pub mod headless;
mod keys;

pub use headless::HeadlessBackend;
pub use keys::map_key_event;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Block until the next logical key arrives.
    fn read_key(&mut self) -> Result<Key>;
    /// Current screen size as `(rows, cols)`.
    fn screen_size(&self) -> Result<(u16, u16)>;
    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()>;
    fn clear_screen(&mut self) -> Result<()>;
    /// Draw `text` starting at `(row, col)`. Text past the right edge is
    /// the caller's concern.
    fn write_text(&mut self, row: u16, col: u16, text: &str) -> Result<()>;
    /// Flush queued output to the screen.
    fn refresh(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a, B: TerminalBackend + ?Sized = CrosstermBackend> {
    backend: &'a mut B,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        TerminalGuard::enter(self)
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Show)?;
            self.entered = true;
            tracing::debug!(target: "terminal", "enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "terminal", "leave");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(k) = map_key_event(&key) {
                        return Ok(k);
                    }
                }
                Event::Resize(cols, rows) => {
                    tracing::trace!(target: "terminal", cols, rows, "resize");
                    return Ok(Key::Resize);
                }
                _ => {}
            }
        }
    }

    fn screen_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(stdout(), MoveTo(col, row))?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        queue!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    fn write_text(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        queue!(stdout(), MoveTo(col, row), Print(text))?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        stdout().flush()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a, B: TerminalBackend + ?Sized> TerminalGuard<'a, B> {
    /// Enter `backend`; it is left again when the guard drops.
    pub fn enter(backend: &'a mut B) -> Result<Self> {
        backend.enter()?;
        Ok(Self { backend })
    }

    /// The guarded backend, for drawing and reading keys while entered.
    pub fn backend_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: TerminalBackend + ?Sized> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
