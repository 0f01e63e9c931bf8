//! Parser context: owns the input buffer and the parsed tree
//!
//! A [`Parser`] goes through `new` → `set_buffer` / `open` → `parse` →
//! queries → `clear`, and can be reused for another buffer afterwards.
//! Independent parsers share nothing.

pub mod config;
mod grammar;

pub use config::Config;

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, QueryResult, Result, Span};
use crate::input::Input;
use crate::query::Scope;
use crate::tree::{Document, Node, Section};
use grammar::Grammar;

/// Owns one buffer and the document parsed from it
#[derive(Clone, Debug, Default)]
pub struct Parser {
    input: Option<Input>,
    document: Document,
    config: Config,
}

impl Parser {
    /// Create an empty parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty parser with custom configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Replace the buffer; the previous document is discarded
    pub fn set_buffer(&mut self, input: impl Into<Input>) {
        self.document = Document::default();
        self.input = Some(input.into());
    }

    pub fn buffer(&self) -> Option<&Input> {
        self.input.as_ref()
    }

    /// Read a whole file into the buffer and parse it
    ///
    /// On a read failure the parser is left empty.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&Document> {
        self.clear();
        let input = Input::from_file(path)?;
        self.input = Some(input);
        self.parse()
    }

    /// Parse the current buffer, replacing any earlier document
    pub fn parse(&mut self) -> Result<&Document> {
        self.document = Document::default();
        let input = match &self.input {
            Some(input) if !input.is_empty() => input,
            _ => return Err(Error::new(ErrorKind::EmptyInput, Span::empty())),
        };
        if self.config.exceeds_size(input.len()) {
            return Err(Error::new(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                Span::empty(),
            ));
        }

        debug!(
            bytes = input.len(),
            file = ?input.filename(),
            strict = self.config.strict,
            "parsing buffer"
        );
        self.document = Grammar::new(input.as_bytes(), self.config).parse_document()?;
        debug!(sections = self.document.sections().len(), "parsed buffer");
        Ok(&self.document)
    }

    /// Drop the buffer and the tree; safe to call any number of times
    pub fn clear(&mut self) {
        self.input = None;
        self.document = Document::default();
    }

    /// The parsed document; empty before a successful parse
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn is_parsed(&self) -> bool {
        !self.document.is_empty()
    }

    pub fn get_section(&self, name: Option<&str>) -> QueryResult<&Section> {
        self.document.get_section(name)
    }

    pub fn get_node<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<&'a Node> {
        self.document.get_node(scope, key)
    }

    pub fn get_node_from_node<'a>(
        &'a self,
        parent: Option<&'a Node>,
        key: &str,
    ) -> QueryResult<&'a Node> {
        self.document.get_node_from_node(parent, key)
    }

    pub fn get_string<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<&'a str> {
        self.document.get_string(scope, key)
    }

    pub fn get_int<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<i64> {
        self.document.get_int(scope, key)
    }

    pub fn get_float<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<f64> {
        self.document.get_float(scope, key)
    }

    pub fn get_bool<'a, 'n>(&'a self, scope: impl Into<Scope<'n, 'a>>, key: &str) -> bool {
        self.document.get_bool(scope, key)
    }
}
