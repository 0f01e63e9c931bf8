//! Quoted and bare scalar tokens
//!
//! A scalar is either `"..."` (ends at the next `"`, no escapes) or a bare
//! run of bytes that ends at a delimiter. Values and keys differ only in
//! their delimiters. Inside an array or object a bare value also ends at
//! that container's closing byte, so `[1,2,3]` reads `3` rather than `3]`.

use super::{is_whitespace, Cursor};

/// A scalar token as it appears in the input, quotes stripped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar<'a> {
    pub bytes: &'a [u8],
    pub quoted: bool,
    /// False only for a quoted scalar that hit the end of input
    pub terminated: bool,
}

impl Scalar<'_> {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Owned text of the scalar, `None` when it captured nothing
    pub fn text(&self) -> Option<String> {
        if self.bytes.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(self.bytes).into_owned())
        }
    }
}

/// Read a value: bare values end at whitespace, `,`, `;` or `closer`
pub fn read_value<'a>(cursor: &mut Cursor<'a>, closer: Option<u8>) -> Scalar<'a> {
    read_scalar(cursor, |b| {
        is_whitespace(b) || b == b',' || b == b';' || Some(b) == closer
    })
}

/// Read a key: bare keys end at whitespace or `=`
pub fn read_key<'a>(cursor: &mut Cursor<'a>) -> Scalar<'a> {
    read_scalar(cursor, |b| is_whitespace(b) || b == b'=')
}

fn read_scalar<'a>(cursor: &mut Cursor<'a>, is_delimiter: impl Fn(u8) -> bool) -> Scalar<'a> {
    if cursor.consume(b'"') {
        let start = cursor.pos();
        while let Some(b) = cursor.current() {
            if b == b'"' {
                let bytes = cursor.slice_from(start);
                cursor.advance();
                return Scalar {
                    bytes,
                    quoted: true,
                    terminated: true,
                };
            }
            cursor.advance();
        }
        return Scalar {
            bytes: cursor.slice_from(start),
            quoted: true,
            terminated: false,
        };
    }

    let start = cursor.pos();
    while cursor.current().is_some_and(|b| !is_delimiter(b)) {
        cursor.advance();
    }
    Scalar {
        bytes: cursor.slice_from(start),
        quoted: false,
        terminated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_value_stops_at_delimiters() {
        for (input, expected, rest) in [
            ("abc def", "abc", " def"),
            ("abc,def", "abc", ",def"),
            ("abc;def", "abc", ";def"),
            ("a=b}", "a=b}", ""),
        ] {
            let mut cursor = Cursor::new(input.as_bytes());
            let scalar = read_value(&mut cursor, None);
            assert_eq!(scalar.bytes, expected.as_bytes());
            assert!(!scalar.quoted);
            assert_eq!(cursor.remaining(), rest.as_bytes());
        }
    }

    #[test]
    fn test_bare_value_stops_at_container_closer() {
        let mut cursor = Cursor::new(b"30]");
        assert_eq!(read_value(&mut cursor, Some(b']')).bytes, b"30");
        assert_eq!(cursor.current(), Some(b']'));

        let mut cursor = Cursor::new(b"30]");
        assert_eq!(read_value(&mut cursor, Some(b'}')).bytes, b"30]");
    }

    #[test]
    fn test_quoted_value_keeps_interior_delimiters() {
        let mut cursor = Cursor::new(br#""a, b; c" tail"#);
        let scalar = read_value(&mut cursor, None);
        assert_eq!(scalar.text().as_deref(), Some("a, b; c"));
        assert!(scalar.quoted && scalar.terminated);
        assert_eq!(cursor.pos(), 9);
    }

    #[test]
    fn test_unterminated_quote_runs_to_eof() {
        let mut cursor = Cursor::new(br#""open ended"#);
        let scalar = read_value(&mut cursor, None);
        assert_eq!(scalar.bytes, b"open ended");
        assert!(!scalar.terminated);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_empty_captures_have_no_text() {
        let mut cursor = Cursor::new(br#""""#);
        let scalar = read_value(&mut cursor, None);
        assert_eq!(scalar.text(), None);
        assert_eq!(cursor.pos(), 2);

        let mut cursor = Cursor::new(b", x");
        assert!(read_value(&mut cursor, None).is_empty());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_key_stops_at_equals() {
        let mut cursor = Cursor::new(b"name=value");
        assert_eq!(read_key(&mut cursor).bytes, b"name");
        assert_eq!(cursor.current(), Some(b'='));

        let mut cursor = Cursor::new(br#""weird key" = 1"#);
        let key = read_key(&mut cursor);
        assert_eq!(key.text().as_deref(), Some("weird key"));
        assert_eq!(cursor.remaining(), b" = 1");
    }
}
