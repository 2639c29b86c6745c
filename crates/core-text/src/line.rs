//! Single-line text value.
//!
//! All offsets are `char` indices (one char = one column; grapheme clusters
//! are not special-cased). Offsets past the end are clamped to the line
//! length so callers never have to pre-validate positions.
//!
//! Invariant: a `Line` never contains `'\n'`. Constructors strip newlines
//! instead of rejecting them.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Line(String);

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        let mut s: String = text.into();
        if s.contains('\n') {
            s.retain(|c| c != '\n');
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        if self.0.is_ascii() {
            self.0.len()
        } else {
            self.0.chars().count()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.0.chars().nth(idx)
    }

    // Byte offset of char index `idx`, clamped to the end of the string.
    fn byte_offset(&self, idx: usize) -> usize {
        if self.0.is_ascii() {
            return idx.min(self.0.len());
        }
        self.0
            .char_indices()
            .nth(idx)
            .map(|(b, _)| b)
            .unwrap_or(self.0.len())
    }

    fn byte_range(&self, start: usize, end: usize) -> (usize, usize) {
        let s = self.byte_offset(start);
        let e = self.byte_offset(end.max(start));
        (s, e)
    }

    fn char_index(&self, byte: usize) -> usize {
        self.0[..byte].chars().count()
    }

    /// Substring over the char range `[start, end)`.
    pub fn substr(&self, start: usize, end: usize) -> &str {
        let (s, e) = self.byte_range(start, end);
        &self.0[s..e]
    }

    /// Substring from `start` to the end of the line.
    pub fn tail(&self, start: usize) -> &str {
        &self.0[self.byte_offset(start)..]
    }

    pub fn insert_char(&mut self, at: usize, c: char) {
        if c == '\n' {
            return;
        }
        let b = self.byte_offset(at);
        self.0.insert(b, c);
    }

    pub fn insert_str(&mut self, at: usize, text: &str) {
        let b = self.byte_offset(at);
        if text.contains('\n') {
            let cleaned: String = text.chars().filter(|c| *c != '\n').collect();
            self.0.insert_str(b, &cleaned);
        } else {
            self.0.insert_str(b, text);
        }
    }

    /// Remove the char range `[start, end)` and return it.
    pub fn remove_range(&mut self, start: usize, end: usize) -> String {
        let (s, e) = self.byte_range(start, end);
        self.0.drain(s..e).collect()
    }

    /// Replace the char range `[start, end)` with `with`.
    pub fn replace_range(&mut self, start: usize, end: usize, with: &str) {
        let (s, e) = self.byte_range(start, end);
        self.0.replace_range(s..e, with);
        if with.contains('\n') {
            self.0.retain(|c| c != '\n');
        }
    }

    /// Split at char offset `at`, keeping the head and returning the tail.
    pub fn split_off(&mut self, at: usize) -> Line {
        let b = self.byte_offset(at);
        Line(self.0.split_off(b))
    }

    /// Concatenate `other` onto the end of this line.
    pub fn append(&mut self, other: &Line) {
        self.0.push_str(&other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// First occurrence of `needle` starting at or after char `from`.
    pub fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let b = self.byte_offset(from);
        self.0[b..]
            .find(needle)
            .map(|pos| self.char_index(b + pos))
    }

    /// Last occurrence of `needle` lying entirely before char `end`.
    pub fn rfind_before(&self, needle: &str, end: usize) -> Option<usize> {
        let b = self.byte_offset(end);
        self.0[..b].rfind(needle).map(|pos| self.char_index(pos))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::new(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Line::new(s)
    }
}

impl From<Line> for String {
    fn from(l: Line) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_strips_newlines() {
        assert_eq!(Line::new("a\nb").as_str(), "ab");
    }

    #[test]
    fn substr_clamps() {
        let l = Line::new("hello");
        assert_eq!(l.substr(1, 3), "el");
        assert_eq!(l.substr(3, 100), "lo");
        assert_eq!(l.substr(4, 2), "");
        assert_eq!(l.tail(9), "");
    }

    #[test]
    fn char_offsets_are_not_bytes() {
        let mut l = Line::new("añb");
        assert_eq!(l.len(), 3);
        l.insert_char(2, 'x');
        assert_eq!(l.as_str(), "añxb");
        assert_eq!(l.remove_range(1, 2), "ñ");
        assert_eq!(l.as_str(), "axb");
    }

    #[test]
    fn replace_and_split() {
        let mut l = Line::new("abcd");
        l.replace_range(1, 2, "Z");
        assert_eq!(l.as_str(), "aZcd");
        let tail = l.split_off(2);
        assert_eq!(l.as_str(), "aZ");
        assert_eq!(tail.as_str(), "cd");
        l.append(&tail);
        assert_eq!(l.as_str(), "aZcd");
    }

    #[test]
    fn find_and_rfind_report_char_indices() {
        let l = Line::new("ñbar bar");
        assert_eq!(l.find_from("bar", 0), Some(1));
        assert_eq!(l.find_from("bar", 2), Some(5));
        assert_eq!(l.rfind_before("bar", 8), Some(5));
        assert_eq!(l.rfind_before("bar", 7), Some(1));
        assert_eq!(l.rfind_before("bar", 3), None);
    }
}
