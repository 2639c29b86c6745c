//! In-memory terminal used by tests and scripted sessions.
//!
//! Keys are replayed from a queue; drawing lands in a fixed `rows x cols`
//! character grid that tests can inspect after `refresh`. Reading past the
//! end of the script is an error so a runaway loop fails fast instead of
//! blocking.

use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use core_events::Key;

use crate::TerminalBackend;

#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    keys: VecDeque<Key>,
    rows: u16,
    cols: u16,
    grid: Vec<Vec<char>>,
    cursor: (u16, u16),
    title: String,
    entered: bool,
    refreshes: usize,
}

impl HeadlessBackend {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            keys: VecDeque::new(),
            rows,
            cols,
            grid: vec![vec![' '; usize::from(cols)]; usize::from(rows)],
            cursor: (0, 0),
            title: String::new(),
            entered: false,
            refreshes: 0,
        }
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Queue every char of `text` as a `Key::Char`.
    pub fn push_str(&mut self, text: &str) {
        self.keys.extend(text.chars().map(Key::Char));
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Row `row` of the grid with trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        self.grid
            .get(usize::from(row))
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Every row, trimmed.
    pub fn screen(&self) -> Vec<String> {
        (0..self.rows).map(|r| self.row_text(r)).collect()
    }

    /// Last cursor placement as `(row, col)`.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn resize(&mut self, rows: u16, cols: u16) {
        *self = Self {
            keys: std::mem::take(&mut self.keys),
            title: std::mem::take(&mut self.title),
            entered: self.entered,
            refreshes: self.refreshes,
            ..Self::new(rows, cols)
        };
    }
}

impl TerminalBackend for HeadlessBackend {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = title.to_string();
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow!("scripted input exhausted"))
    }

    fn screen_size(&self) -> Result<(u16, u16)> {
        Ok((self.rows, self.cols))
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.cursor = (row, col);
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        for row in &mut self.grid {
            row.fill(' ');
        }
        Ok(())
    }

    fn write_text(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        let Some(line) = self.grid.get_mut(usize::from(row)) else {
            return Ok(());
        };
        for (slot, c) in line.iter_mut().skip(usize::from(col)).zip(text.chars()) {
            *slot = c;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }
}
