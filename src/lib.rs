//! vcfg - parser and query API for sectioned `key = value` config files
//!
//! The format has `[Section]` headers, `key = value` pairs with bare or
//! double-quoted values, nested `{ ... }` objects and `[ ... ]` arrays, and
//! `//` / `/* */` comments. Malformed fragments are dropped rather than
//! rejected unless [`Config::strict`] is set.
//!
//! # Quick Start
//!
//! ```
//! use vcfg::{from_str, Scope};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = from_str(
//!     r#"
//!     name = "demo app"   // root section
//!     [Server]
//!     port = 8080
//!     hosts = [alpha, beta]
//!     "#,
//! )?;
//! assert_eq!(doc.get_string(Scope::Root, "name")?, "demo app");
//! assert_eq!(doc.get_int("Server", "port")?, 8080);
//!
//! let hosts = doc.get_node("Server", "hosts")?;
//! assert_eq!(doc.get_string(hosts, "1")?, "beta");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use std::path::Path;

use tracing::instrument;

pub mod error;
pub use error::{Error, ErrorKind, Pos, QueryError, QueryResult, Result, Span};

pub mod input;
pub use input::Input;

pub mod lexer;

pub mod convert;
pub use convert::{LEGACY_FLOAT_SENTINEL, LEGACY_NUMERIC_SENTINEL};

pub mod tree;
pub use tree::{Document, Node, NodeKind, Section, ARRAY_SENTINEL, OBJECT_SENTINEL};

pub mod query;
pub use query::Scope;

pub mod parser;
pub use parser::{Config, Parser};

/// Parse a document from a string
pub fn from_str(s: &str) -> Result<Document> {
    from_str_with_config(s, Config::default())
}

/// Parse a document from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new();
    parser.set_buffer(bytes);
    parser.parse()?;
    Ok(parser.into_document())
}

/// Parse with custom configuration
pub fn from_str_with_config(s: &str, config: Config) -> Result<Document> {
    let mut parser = Parser::with_config(config);
    parser.set_buffer(s);
    parser.parse()?;
    Ok(parser.into_document())
}

/// Read and parse a file
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let mut parser = Parser::new();
    parser.open(path)?;
    Ok(parser.into_document())
}
