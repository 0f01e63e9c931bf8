//! Byte cursor for efficient input navigation
//!
//! The cursor only ever moves forward and never past the end of its slice.
//! The `skip_*` methods return the number of bytes they stepped over, with
//! 0 meaning "nothing recognised here".

use super::is_whitespace;
use crate::error::Pos;

/// Cursor for navigating byte input with position tracking
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// Create cursor from byte slice
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Get current byte without consuming
    pub fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advance cursor by one byte
    pub fn advance(&mut self) {
        if let Some(b) = self.current() {
            self.pos += 1;
            if b == b'\n' {
                self.line = self.line.saturating_add(1);
                self.col = 1;
            } else {
                self.col = self.col.saturating_add(1);
            }
        }
    }

    /// Consume byte if it matches
    pub fn consume(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Check whether the remaining input starts with `marker`
    pub fn starts_with(&self, marker: &[u8]) -> bool {
        self.remaining().starts_with(marker)
    }

    /// Get current position
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get slice from start to current position
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    /// Skip whitespace
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.current().is_some_and(is_whitespace) {
            self.advance();
        }
        self.pos - start
    }

    /// Skip a `//` comment up to and including the next newline
    pub fn skip_line_comment(&mut self) -> usize {
        if !self.starts_with(b"//") {
            return 0;
        }
        let start = self.pos;
        while let Some(b) = self.current() {
            self.advance();
            if b == b'\n' {
                break;
            }
        }
        self.pos - start
    }

    /// Skip a `/* ... */` comment
    ///
    /// An unterminated comment swallows the rest of the input.
    pub fn skip_block_comment(&mut self) -> usize {
        if !self.starts_with(b"/*") {
            return 0;
        }
        let start = self.pos;
        self.advance();
        self.advance();
        while !self.is_eof() {
            if self.starts_with(b"*/") {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        self.pos - start
    }

    /// Try a line comment, then a block comment, once each
    pub fn skip_comments(&mut self) -> usize {
        self.skip_line_comment() + self.skip_block_comment()
    }

    /// Advance up to (not past) the next `target` byte, or to the end of input
    pub fn skip_until(&mut self, target: u8) -> usize {
        let start = self.pos;
        while self.current().is_some_and(|b| b != target) {
            self.advance();
        }
        self.pos - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new(b"hello");
        assert_eq!(cursor.current(), Some(b'h'));
        cursor.advance();
        assert_eq!(cursor.current(), Some(b'e'));
    }

    #[test]
    fn test_cursor_whitespace() {
        let mut cursor = Cursor::new(b"  \t\n\x0bhello");
        assert_eq!(cursor.skip_whitespace(), 5);
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.skip_whitespace(), 0);
    }

    #[test]
    fn test_cursor_consume() {
        let mut cursor = Cursor::new(b"abc");
        assert!(cursor.consume(b'a'));
        assert!(!cursor.consume(b'z'));
        assert_eq!(cursor.current(), Some(b'b'));
    }

    #[test]
    fn test_cursor_eof() {
        let mut cursor = Cursor::new(b"");
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
        cursor.advance();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.skip_whitespace(), 0);
        assert_eq!(cursor.skip_comments(), 0);
    }

    #[test]
    fn test_cursor_slice() {
        let mut cursor = Cursor::new(b"hello world");
        let start = cursor.pos();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), b"hel");
    }

    #[test]
    fn test_line_comment_consumes_newline() {
        let mut cursor = Cursor::new(b"// note\nkey");
        assert_eq!(cursor.skip_line_comment(), 8);
        assert_eq!(cursor.remaining(), b"key");
    }

    #[test]
    fn test_line_comment_at_eof() {
        let mut cursor = Cursor::new(b"// trailing");
        assert_eq!(cursor.skip_line_comment(), 11);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_single_slash_is_not_a_comment() {
        let mut cursor = Cursor::new(b"/x");
        assert_eq!(cursor.skip_comments(), 0);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_block_comment() {
        let mut cursor = Cursor::new(b"/* a\n b */rest");
        assert_eq!(cursor.skip_block_comment(), 10);
        assert_eq!(cursor.remaining(), b"rest");
    }

    #[test]
    fn test_block_comment_needs_distinct_closer() {
        // the `*` of the opener cannot close the comment
        let mut cursor = Cursor::new(b"/*/ x */y");
        assert_eq!(cursor.skip_block_comment(), 8);
        assert_eq!(cursor.remaining(), b"y");
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        let mut cursor = Cursor::new(b"/* never closed");
        assert_eq!(cursor.skip_block_comment(), 15);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_skip_comments_tries_each_kind_once() {
        let mut cursor = Cursor::new(b"// a\n/* b */// c\n");
        assert_eq!(cursor.skip_comments(), 12);
        assert_eq!(cursor.remaining(), b"// c\n");
    }

    #[test]
    fn test_skip_until() {
        let mut cursor = Cursor::new(b"1 2, 3]tail");
        assert_eq!(cursor.skip_until(b']'), 6);
        assert_eq!(cursor.current(), Some(b']'));

        let mut cursor = Cursor::new(b"no closer");
        assert_eq!(cursor.skip_until(b']'), 9);
        assert!(cursor.is_eof());
    }
}
