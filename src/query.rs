//! Lookups and typed reads over a parsed [`Document`]
//!
//! Every lookup is a linear, case-sensitive, exact-name scan that returns
//! the first match in declaration order. One call resolves one path
//! segment; walk deeper by passing the returned node back in as a
//! [`Scope::Node`].

use crate::convert;
use crate::error::{QueryError, QueryResult};
use crate::tree::{Document, Node, Section};

/// Where a key is looked up
///
/// The section name and the node are borrowed independently: a name only
/// has to live for the call, while a node ties the result to its document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope<'n, 'a> {
    /// The unnamed root section
    #[default]
    Root,
    /// A named section; an empty name means the root section
    Section(&'n str),
    /// The children of an array or object node
    Node(&'a Node),
}

impl<'n> From<&'n str> for Scope<'n, '_> {
    fn from(name: &'n str) -> Self {
        Self::Section(name)
    }
}

impl<'n> From<Option<&'n str>> for Scope<'n, '_> {
    fn from(name: Option<&'n str>) -> Self {
        name.map_or(Self::Root, Self::Section)
    }
}

impl<'a> From<&'a Node> for Scope<'_, 'a> {
    fn from(node: &'a Node) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<Option<&'a Node>> for Scope<'_, 'a> {
    fn from(node: Option<&'a Node>) -> Self {
        node.map_or(Self::Root, Self::Node)
    }
}

impl Node {
    /// The raw value text
    pub fn as_str(&self) -> QueryResult<&str> {
        self.value().ok_or_else(|| QueryError::MissingValue {
            key: self.name().to_string(),
        })
    }

    pub fn as_int(&self) -> QueryResult<i64> {
        let text = self.as_str()?;
        convert::parse_int(text).ok_or_else(|| self.unparsable(text, "integer"))
    }

    pub fn as_float(&self) -> QueryResult<f64> {
        let text = self.as_str()?;
        convert::parse_float(text).ok_or_else(|| self.unparsable(text, "float"))
    }

    /// True only for the exact text `true`
    pub fn as_bool(&self) -> bool {
        convert::parse_bool(self.value())
    }

    fn unparsable(&self, value: &str, expected: &'static str) -> QueryError {
        QueryError::Unparsable {
            key: self.name().to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

impl Document {
    /// First section with this name; `None` or `""` selects the root
    pub fn get_section(&self, name: Option<&str>) -> QueryResult<&Section> {
        self.sections()
            .iter()
            .find(|section| section.matches(name))
            .ok_or_else(|| QueryError::SectionNotFound {
                name: name.unwrap_or_default().to_string(),
            })
    }

    /// Resolve one key inside a section or a container node
    ///
    /// ```
    /// use vcfg::Scope;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = vcfg::from_str("[net]\nlisten = { port = 8080 }")?;
    /// let listen = doc.get_node("net", "listen")?;
    /// assert_eq!(doc.get_int(listen, "port")?, 8080);
    /// assert!(doc.get_node(Scope::Root, "listen").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_node<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<&'a Node> {
        let found = match scope.into() {
            Scope::Root => self.get_section(None)?.key(key),
            Scope::Section(name) => self.get_section(Some(name))?.key(key),
            Scope::Node(parent) => parent.child(key),
        };
        found.ok_or_else(|| QueryError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Child of `parent`, or a root-section key when there is no parent
    pub fn get_node_from_node<'a>(
        &'a self,
        parent: Option<&'a Node>,
        key: &str,
    ) -> QueryResult<&'a Node> {
        self.get_node(parent, key)
    }

    /// Raw value text; containers yield their sentinel
    pub fn get_string<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<&'a str> {
        self.get_node(scope, key)?.as_str()
    }

    pub fn get_int<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<i64> {
        self.get_node(scope, key)?.as_int()
    }

    pub fn get_float<'a, 'n>(
        &'a self,
        scope: impl Into<Scope<'n, 'a>>,
        key: &str,
    ) -> QueryResult<f64> {
        self.get_node(scope, key)?.as_float()
    }

    /// False when the key is missing or its value is anything but `true`
    pub fn get_bool<'a, 'n>(&'a self, scope: impl Into<Scope<'n, 'a>>, key: &str) -> bool {
        self.get_node(scope, key).is_ok_and(Node::as_bool)
    }

    /// [`Self::get_int`] with every failure folded into `-1`
    pub fn get_int_legacy<'a, 'n>(&'a self, scope: impl Into<Scope<'n, 'a>>, key: &str) -> i64 {
        convert::legacy_int(self.get_node(scope, key).ok().and_then(Node::value))
    }

    /// [`Self::get_float`] with every failure folded into `-1.0`
    pub fn get_float_legacy<'a, 'n>(&'a self, scope: impl Into<Scope<'n, 'a>>, key: &str) -> f64 {
        convert::legacy_float(self.get_node(scope, key).ok().and_then(Node::value))
    }
}
