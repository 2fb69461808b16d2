use crate::traits::Position;

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;

/// A [`Position`] over a borrowed `&str`.
///
/// `index` is a byte offset that always sits on a char boundary; `line` and
/// `column` are zero based and only used for diagnostics.
#[derive(Copy, Clone)]
pub struct StrPosition<'a> {
    text: &'a str,
    index: usize,
    line: u32,
    column: u32,
}

impl<'a> StrPosition<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            index: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Unconsumed input from this position on.
    pub fn rest(&self) -> &'a str {
        self.text.get(self.index..).unwrap_or("")
    }

    fn next(&self, c: char) -> Self {
        let new_line = c == '\n';
        Self {
            text: self.text,
            index: self.index + c.len_utf8(),
            line: if new_line { self.line + 1 } else { self.line },
            column: if new_line { 0 } else { self.column + 1 },
        }
    }
}

impl PartialEq for StrPosition<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for StrPosition<'_> {}

impl fmt::Debug for StrPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrPosition")
            .field("index", &self.index)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish()
    }
}

impl Position for StrPosition<'_> {
    fn at_start(&self) -> bool {
        self.index == 0
    }

    fn at_end(&self) -> bool {
        self.index >= self.text.len()
    }

    fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn previous(&self) -> Option<char> {
        self.text
            .get(..self.index)
            .and_then(|s| s.chars().next_back())
    }

    fn advance(&self) -> Self {
        match self.current() {
            Some(c) => self.next(c),
            None => *self,
        }
    }

    fn is_before(&self, other: &Self) -> bool {
        self.index < other.index
    }

    fn text_between(&self, end: &Self) -> String {
        String::from(self.text.get(self.index..end.index).unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth(text: &str, n: usize) -> StrPosition<'_> {
        let mut pos = StrPosition::new(text);
        for _ in 0..n {
            pos = pos.advance();
        }
        pos
    }

    #[test]
    fn it_tracks_lines_and_columns() {
        let pos = nth("ab\ncd", 4);
        assert_eq!(pos.index(), 4);
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 1);
        assert_eq!(pos.current(), Some('d'));
        assert_eq!(pos.previous(), Some('c'));
    }

    #[test]
    fn it_reports_anchors() {
        let start = StrPosition::new("x");
        assert!(start.at_start());
        assert!(!start.at_end());
        assert_eq!(start.previous(), None);

        let end = start.advance();
        assert!(end.at_end());
        assert!(!end.has_current());
        assert_eq!(end.current(), None);
        assert_eq!(end.advance(), end);
    }

    #[test]
    fn it_steps_over_multibyte_chars() {
        let pos = nth("héllo", 2);
        assert_eq!(pos.index(), 3);
        assert_eq!(pos.current(), Some('l'));
        assert_eq!(pos.previous(), Some('é'));
    }

    #[test]
    fn it_orders_and_slices() {
        let text = "hello world";
        let a = nth(text, 1);
        let b = nth(text, 5);
        assert!(a.is_before(&b));
        assert!(!b.is_before(&a));
        assert!(!a.is_before(&a));
        assert_eq!(a.text_between(&b), "ello");
        assert_eq!(b.text_between(&a), "");
        assert_eq!(b.rest(), " world");
    }

    #[test]
    fn it_compares_by_offset() {
        assert_eq!(nth("abc", 2), nth("abc", 2));
        assert_ne!(nth("abc", 1), nth("abc", 2));
    }
}
