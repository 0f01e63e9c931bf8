//! Recursive-descent grammar over a byte cursor
//!
//! Each `parse_*` method returns how many bytes it consumed, 0 meaning the
//! construct is not present at the cursor. Nothing is ever rewound. In
//! lenient mode a malformed fragment is dropped (bad pairs) or cut short
//! (missing separators, unterminated constructs) and parsing carries on; in
//! strict mode the same situations become errors.

use tracing::{trace, warn};

use super::config::Config;
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::lexer::{scalar, Cursor};
use crate::tree::{Document, Node, Section};

pub(crate) struct Grammar<'a> {
    cursor: Cursor<'a>,
    config: Config,
    depth: u16,
}

impl<'a> Grammar<'a> {
    pub(crate) fn new(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            depth: 0,
        }
    }

    /// Parse the whole buffer into sections, the root section first
    pub(crate) fn parse_document(mut self) -> Result<Document> {
        let mut sections = vec![Section::root()];

        while !self.cursor.is_eof() {
            if self.cursor.skip_whitespace() > 0 {
                continue;
            }
            if self.skip_comments()? > 0 {
                continue;
            }
            if self.parse_section_header(&mut sections)? > 0 {
                continue;
            }

            let (consumed, pair) = self.parse_pair(None)?;
            if let (Some(key), Some(section)) = (pair, sections.last_mut()) {
                section.push_key(key);
            }
            if consumed == 0 {
                break;
            }
        }

        if !self.cursor.is_eof() {
            let pos = self.cursor.position();
            if self.config.strict {
                return Err(Error::at(ErrorKind::TrailingInput, pos));
            }
            warn!(
                line = pos.line,
                col = pos.col,
                remaining = self.cursor.remaining().len(),
                "stopped before end of input"
            );
        }

        Ok(Document::new(sections))
    }

    fn skip_comments(&mut self) -> Result<usize> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        let skipped = self.cursor.skip_comments();
        if self.config.strict
            && self.cursor.is_eof()
            && ends_in_open_block_comment(self.cursor.slice_from(start))
        {
            return Err(Error::at(
                ErrorKind::Unterminated {
                    construct: "block comment",
                },
                start_pos,
            ));
        }
        Ok(skipped)
    }

    /// `[name]` opens a new section; duplicates are appended, never merged
    fn parse_section_header(&mut self, sections: &mut Vec<Section>) -> Result<usize> {
        if self.cursor.current() != Some(b'[') {
            return Ok(0);
        }
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        self.cursor.advance();

        let name_start = self.cursor.pos();
        self.cursor.skip_until(b']');
        let name = self.cursor.slice_from(name_start);
        let closed = self.cursor.consume(b']');

        if !closed {
            self.unterminated("section header", start_pos)?;
        }
        if name.is_empty() {
            if self.config.strict {
                return Err(Error::at(ErrorKind::EmptySectionName, start_pos));
            }
            trace!(line = start_pos.line, "ignored empty section header");
        } else {
            let name = String::from_utf8_lossy(name).into_owned();
            trace!(%name, "opened section");
            sections.push(Section::named(name));
        }

        Ok(self.cursor.pos() - start)
    }

    /// `key = value`, at the top level or inside an object
    ///
    /// The pair is `None` when the key is empty or no `=` follows it; the
    /// bytes read up to that point still count as consumed.
    fn parse_pair(&mut self, closer: Option<u8>) -> Result<(usize, Option<Node>)> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();

        let key = scalar::read_key(&mut self.cursor);
        if !key.terminated {
            self.unterminated("quoted key", start_pos)?;
        }
        self.cursor.skip_whitespace();

        let Some(name) = key.text() else {
            self.reject_pair("empty key", start_pos)?;
            return Ok((self.cursor.pos() - start, None));
        };
        if !self.cursor.consume(b'=') {
            self.reject_pair("missing '='", start_pos)?;
            return Ok((self.cursor.pos() - start, None));
        }
        self.cursor.skip_whitespace();

        let mut node = Node::new(name);
        let value_len = self.parse_element(&mut node, closer)?;
        trace!(key = node.name(), value_len, "parsed pair");
        Ok((self.cursor.pos() - start, Some(node)))
    }

    /// Dispatch on the first byte: object, array, or scalar
    fn parse_element(&mut self, node: &mut Node, closer: Option<u8>) -> Result<usize> {
        match self.cursor.current() {
            Some(b'{') => self.parse_object(node),
            Some(b'[') => self.parse_array(node),
            _ => self.parse_value(node, closer),
        }
    }

    fn parse_value(&mut self, node: &mut Node, closer: Option<u8>) -> Result<usize> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();

        let value = scalar::read_value(&mut self.cursor, closer);
        if !value.terminated {
            self.unterminated("quoted string", start_pos)?;
        }
        if let Some(text) = value.text() {
            node.set_value(text);
        }

        Ok(self.cursor.pos() - start)
    }

    /// `[ v0, v1, ... ]`, children named by zero-based index
    fn parse_array(&mut self, node: &mut Node) -> Result<usize> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        if !self.cursor.consume(b'[') {
            return Ok(0);
        }
        self.enter(start_pos)?;
        node.mark_array();

        let mut index: usize = 0;
        loop {
            match self.cursor.current() {
                None => {
                    self.unterminated("array", start_pos)?;
                    break;
                }
                Some(b']') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {}
            }
            if self.cursor.skip_whitespace() > 0 {
                continue;
            }
            if self.skip_comments()? > 0 {
                continue;
            }

            let mut element = Node::new(index.to_string());
            if self.parse_element(&mut element, Some(b']'))? == 0 {
                self.abandon_container(b']')?;
                continue;
            }
            node.push_child(element);

            if self.expect_separator(b']')? {
                index += 1;
            }
        }

        self.exit();
        Ok(self.cursor.pos() - start)
    }

    /// `{ k0 = v0, k1 = v1, ... }`
    fn parse_object(&mut self, node: &mut Node) -> Result<usize> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        if !self.cursor.consume(b'{') {
            return Ok(0);
        }
        self.enter(start_pos)?;
        node.mark_object();

        loop {
            match self.cursor.current() {
                None => {
                    self.unterminated("object", start_pos)?;
                    break;
                }
                Some(b'}') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {}
            }
            if self.cursor.skip_whitespace() > 0 {
                continue;
            }
            if self.skip_comments()? > 0 {
                continue;
            }

            let (consumed, pair) = self.parse_pair(Some(b'}'))?;
            if consumed == 0 {
                self.abandon_container(b'}')?;
                continue;
            }
            if let Some(child) = pair {
                node.push_child(child);
            }

            self.expect_separator(b'}')?;
        }

        self.exit();
        Ok(self.cursor.pos() - start)
    }

    /// After an item: skip whitespace and take a `,` if there is one.
    ///
    /// Anything other than `,` or the closer truncates the container: the
    /// cursor moves up to the closer and the rest of the container is lost.
    fn expect_separator(&mut self, closer: u8) -> Result<bool> {
        self.cursor.skip_whitespace();
        if self.cursor.consume(b',') {
            return Ok(true);
        }
        match self.cursor.current() {
            None => {}
            Some(b) if b == closer => {}
            Some(_) => {
                let pos = self.cursor.position();
                if self.config.strict {
                    return Err(Error::at(
                        ErrorKind::MissingSeparator {
                            closer: char::from(closer),
                        },
                        pos,
                    ));
                }
                let skipped = self.cursor.skip_until(closer);
                trace!(line = pos.line, col = pos.col, skipped, "missing separator, truncated container");
            }
        }
        Ok(false)
    }

    /// Nothing parseable at the cursor inside a container: give up on it
    fn abandon_container(&mut self, closer: u8) -> Result<()> {
        let pos = self.cursor.position();
        if let Some(found) = self.cursor.current() {
            if self.config.strict {
                return Err(Error::at(ErrorKind::UnexpectedByte { found }, pos));
            }
        }
        let skipped = self.cursor.skip_until(closer);
        trace!(line = pos.line, col = pos.col, skipped, "no element at cursor, truncated container");
        Ok(())
    }

    fn reject_pair(&self, reason: &'static str, pos: Pos) -> Result<()> {
        if self.config.strict {
            return Err(Error::at(ErrorKind::InvalidPair { reason }, pos));
        }
        trace!(line = pos.line, col = pos.col, reason, "dropped key-value pair");
        Ok(())
    }

    fn unterminated(&self, construct: &'static str, pos: Pos) -> Result<()> {
        if self.config.strict {
            return Err(Error::at(ErrorKind::Unterminated { construct }, pos));
        }
        trace!(line = pos.line, col = pos.col, construct, "unterminated, ran to end of input");
        Ok(())
    }

    fn enter(&mut self, pos: Pos) -> Result<()> {
        self.depth = self.depth.saturating_add(1);
        if self.config.exceeds_depth(self.depth) {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                pos,
            ));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Whether the bytes skipped by one `skip_comments` call end inside an
/// unclosed `/*` comment
fn ends_in_open_block_comment(skipped: &[u8]) -> bool {
    let block = if skipped.starts_with(b"//") {
        match skipped.iter().position(|&b| b == b'\n') {
            Some(newline) => skipped.get(newline + 1..).unwrap_or_default(),
            None => return false,
        }
    } else {
        skipped
    };
    !block.is_empty() && (block.len() < 4 || !block.ends_with(b"*/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn parse(input: &str) -> Result<Document> {
        Grammar::new(input.as_bytes(), Config::default()).parse_document()
    }

    fn parse_strict(input: &str) -> Result<Document> {
        Grammar::new(input.as_bytes(), Config::default().with_strict(true)).parse_document()
    }

    fn values(node: &Node) -> Vec<(&str, Option<&str>)> {
        node.children()
            .iter()
            .map(|child| (child.name(), child.value()))
            .collect()
    }

    #[test]
    fn test_root_section_always_first() -> Result<()> {
        let doc = parse("[named]\nk = v")?;
        assert_eq!(doc.sections().len(), 2);
        assert!(doc.sections().first().is_some_and(Section::is_root));
        Ok(())
    }

    #[test]
    fn test_parse_array_of_scalars() -> Result<()> {
        let doc = parse("arr = [10, 20, 30]")?;
        let arr = doc.root().and_then(|s| s.key("arr"));
        let arr = arr.ok_or_else(|| Error::at(ErrorKind::TrailingInput, Pos::default()))?;
        assert_eq!(arr.kind(), NodeKind::Array);
        assert_eq!(
            values(arr),
            vec![("0", Some("10")), ("1", Some("20")), ("2", Some("30"))]
        );
        Ok(())
    }

    #[test]
    fn test_nested_arrays_close_properly() -> Result<()> {
        let doc = parse("m = [[1, 2], [3]]\nafter = yes")?;
        let root = doc.root().ok_or_else(|| Error::at(ErrorKind::EmptyInput, Pos::default()))?;
        let m = root.key("m").map(Node::children).unwrap_or_default();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(1).map(|n| n.children().len()), Some(1));
        assert_eq!(root.key("after").and_then(Node::value), Some("yes"));
        Ok(())
    }

    #[test]
    fn test_missing_comma_truncates_array() -> Result<()> {
        let doc = parse("a = [1 2, 3]\nb = 4")?;
        let root = doc.root().ok_or_else(|| Error::at(ErrorKind::EmptyInput, Pos::default()))?;
        let a = root.key("a").map(values).unwrap_or_default();
        assert_eq!(a, vec![("0", Some("1"))]);
        assert_eq!(root.key("b").and_then(Node::value), Some("4"));
        Ok(())
    }

    #[test]
    fn test_stray_comma_ends_array() -> Result<()> {
        let doc = parse("a = [, 1]\nb = 2")?;
        let root = doc.root().ok_or_else(|| Error::at(ErrorKind::EmptyInput, Pos::default()))?;
        assert_eq!(root.key("a").map(|n| n.children().len()), Some(0));
        assert_eq!(root.key("b").and_then(Node::value), Some("2"));
        Ok(())
    }

    #[test]
    fn test_dropped_object_pair() -> Result<()> {
        let doc = parse("o = { = 1, a = 2 }\np = { x 1, y = 2 }\nq = 3")?;
        let root = doc.root().ok_or_else(|| Error::at(ErrorKind::EmptyInput, Pos::default()))?;
        assert_eq!(root.key("o").map(|n| n.children().len()), Some(0));
        assert_eq!(root.key("p").map(|n| n.children().len()), Some(0));
        assert_eq!(root.key("q").and_then(Node::value), Some("3"));
        Ok(())
    }

    #[test]
    fn test_unrecognised_input_stops_parse() -> Result<()> {
        let doc = parse("a = 1\n= 2\nb = 3")?;
        let root = doc.root().ok_or_else(|| Error::at(ErrorKind::EmptyInput, Pos::default()))?;
        assert_eq!(root.keys().len(), 1);
        assert!(root.key("b").is_none());
        Ok(())
    }

    #[test]
    #[allow(clippy::panic)]
    fn test_strict_mode_errors() {
        let cases = [
            ("a = [1 2]", ErrorKind::MissingSeparator { closer: ']' }),
            ("a = { x = 1 y = 2 }", ErrorKind::MissingSeparator { closer: '}' }),
            ("a = [1, 2", ErrorKind::Unterminated { construct: "array" }),
            ("a = \"open", ErrorKind::Unterminated { construct: "quoted string" }),
            ("/* open", ErrorKind::Unterminated { construct: "block comment" }),
            ("[]\na = 1", ErrorKind::EmptySectionName),
            ("[open", ErrorKind::Unterminated { construct: "section header" }),
            ("a 1", ErrorKind::InvalidPair { reason: "missing '='" }),
            ("= 1", ErrorKind::InvalidPair { reason: "empty key" }),
            ("a = [,]", ErrorKind::UnexpectedByte { found: b',' }),
        ];
        for (input, expected) in cases {
            match parse_strict(input) {
                Err(err) => assert_eq!(err.kind(), &expected, "input: {input:?}"),
                Ok(doc) => panic!("expected {expected:?} for {input:?}, got {doc:?}"),
            }
        }
    }

    #[test]
    fn test_strict_mode_error_position() {
        let err = parse_strict("a = 1\nb = [1 2]").err();
        let start = err.map(|err| err.span().start);
        assert_eq!(start.map(|pos| (pos.line, pos.col)), Some((2, 8)));
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_input() -> Result<()> {
        let doc = parse_strict("// c\n/* d */\nk = [1, { a = \"x\" }]\n[S]\nv = 2\n")?;
        assert_eq!(doc.sections().len(), 2);
        Ok(())
    }

    #[test]
    fn test_max_depth() {
        let config = Config::new(2, 0);
        let ok = Grammar::new(b"a = [[1]]", config).parse_document();
        assert!(ok.is_ok());
        let err = Grammar::new(b"a = [[[1]]]", config).parse_document();
        assert!(matches!(
            err.map_err(|e| e.kind().clone()),
            Err(ErrorKind::MaxDepthExceeded { max: 2 })
        ));
    }

    #[test]
    fn test_element_parsers_report_consumed_bytes() -> Result<()> {
        let mut grammar = Grammar::new(b"[1, [2]] tail", Config::default());
        let mut node = Node::new("arr");
        assert_eq!(grammar.parse_element(&mut node, None)?, 8);
        assert_eq!(node.children().len(), 2);

        let mut grammar = Grammar::new(b"{ a = 1 }, rest", Config::default());
        let mut node = Node::new("obj");
        assert_eq!(grammar.parse_element(&mut node, None)?, 9);
        assert!(node.child("a").is_some());

        let mut grammar = Grammar::new(b"\"x y\"z", Config::default());
        let mut node = Node::new("s");
        assert_eq!(grammar.parse_element(&mut node, None)?, 5);
        assert_eq!(node.value(), Some("x y"));

        let mut grammar = Grammar::new(b",", Config::default());
        let mut node = Node::new("none");
        assert_eq!(grammar.parse_element(&mut node, Some(b']'))?, 0);
        Ok(())
    }

    #[test]
    fn test_open_block_comment_detection() {
        assert!(ends_in_open_block_comment(b"/* x"));
        assert!(ends_in_open_block_comment(b"/*/"));
        assert!(ends_in_open_block_comment(b"// a\n/* b"));
        assert!(!ends_in_open_block_comment(b"/**/"));
        assert!(!ends_in_open_block_comment(b"// only a line"));
        assert!(!ends_in_open_block_comment(b""));
    }
}
