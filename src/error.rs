//! Error types for vcfg
//!
//! Parsing and querying fail in different ways, so they get different types:
//! [`Error`] carries a source [`Span`] and is returned by the parse entry
//! points, while [`QueryError`] describes why a lookup or a typed projection
//! of a parsed value did not produce a result.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Position in source code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No buffer was set, or the buffer holds zero bytes
    EmptyInput,
    /// Reading the configuration file failed
    Io { path: String, reason: String },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// A quoted string, comment, section header or container ran into the end of input
    Unterminated { construct: &'static str },
    /// An array element or object pair was not followed by `,` or the closer
    MissingSeparator { closer: char },
    /// A `key = value` statement with an empty key or without `=`
    InvalidPair { reason: &'static str },
    EmptySectionName,
    /// Nothing at this position could start an element
    UnexpectedByte { found: u8 },
    /// The parser stopped before the end of the buffer
    TrailingInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::Io { path, reason } => write!(f, "cannot read {path}: {reason}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::Unterminated { construct } => write!(f, "unterminated {construct}"),
            Self::MissingSeparator { closer } => {
                write!(f, "expected ',' or '{closer}'")
            }
            Self::InvalidPair { reason } => write!(f, "invalid key-value pair: {reason}"),
            Self::EmptySectionName => write!(f, "empty section name"),
            Self::UnexpectedByte { found } => {
                write!(f, "unexpected byte {:?}", char::from(*found))
            }
            Self::TrailingInput => write!(f, "unparsed trailing input"),
        }
    }
}

/// Main error type for vcfg
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::new(pos, pos))
    }

    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(
            ErrorKind::Io {
                path: path.display().to_string(),
                reason: err.to_string(),
            },
            Span::empty(),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span == Span::empty() {
            write!(f, "error: {}", self.message)
        } else {
            write!(f, "error at {}: {}", self.span.start, self.message)
        }
    }
}

/// Result type alias for vcfg
pub type Result<T> = std::result::Result<T, Error>;

/// Why a lookup or typed read produced no value
///
/// Absence (`SectionNotFound`, `KeyNotFound`, `MissingValue`) and a value
/// that exists but cannot be read as the requested type (`Unparsable`) are
/// separate variants; [`crate::convert::LEGACY_NUMERIC_SENTINEL`] folds
/// them back together for callers that need the old single `-1`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("section not found: [{name}]")]
    SectionNotFound { name: String },

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("key {key} has no value")]
    MissingValue { key: String },

    #[error("value {value:?} of key {key} is not a valid {expected}")]
    Unparsable {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl QueryError {
    /// True for every variant that means "nothing there", as opposed to a
    /// value of the wrong shape
    pub fn is_absent(&self) -> bool {
        !matches!(self, Self::Unparsable { .. })
    }
}

/// Result type alias for queries against a parsed document
pub type QueryResult<T> = std::result::Result<T, QueryError>;
