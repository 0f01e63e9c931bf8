//! Parsed section/key tree
//!
//! A [`Document`] is an ordered list of [`Section`]s, the first of which is
//! always the unnamed root section. Each section holds top-level [`Node`]s;
//! container nodes own their children directly, so dropping the document
//! releases the whole tree.

use std::fmt;

/// Value text stored on array nodes
pub const ARRAY_SENTINEL: &str = "[array]";
/// Value text stored on object nodes
pub const OBJECT_SENTINEL: &str = "{object}";

/// What a node holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    /// No value was captured, e.g. `key =` at end of input or `key = ""`
    #[default]
    Empty,
    Scalar,
    Array,
    Object,
}

/// A named tree unit: a scalar, or a container with children
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    name: String,
    kind: NodeKind,
    value: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a scalar node
    pub fn scalar(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::new(name);
        node.set_value(value.into());
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Raw value text; containers report their sentinel
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Children in encounter order. Array children are named "0", "1", ...
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child with exactly this name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Array element by position
    pub fn element(&self, index: usize) -> Option<&Node> {
        match self.kind {
            NodeKind::Array => self.child(&index.to_string()),
            _ => None,
        }
    }

    /// Returns true if this node holds a scalar value
    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    /// Returns true if this node is an array
    pub fn is_array(&self) -> bool {
        self.kind == NodeKind::Array
    }

    /// Returns true if this node is an object
    pub fn is_object(&self) -> bool {
        self.kind == NodeKind::Object
    }

    /// Returns true if this node is an array or an object
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Array | NodeKind::Object)
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.kind = NodeKind::Scalar;
        self.value = Some(value);
    }

    pub(crate) fn mark_array(&mut self) {
        self.kind = NodeKind::Array;
        self.value = Some(ARRAY_SENTINEL.to_string());
    }

    pub(crate) fn mark_object(&mut self) {
        self.kind = NodeKind::Object;
        self.value = Some(OBJECT_SENTINEL.to_string());
    }

    pub(crate) fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        match (&self.kind, &self.value) {
            (NodeKind::Scalar, Some(value)) => {
                writeln!(f, "{:indent$}{} = {:?}", "", self.name, value)?;
            }
            (NodeKind::Array | NodeKind::Object, Some(sentinel)) => {
                writeln!(f, "{:indent$}{} {}", "", self.name, sentinel)?;
            }
            _ => writeln!(f, "{:indent$}{} =", "", self.name)?,
        }
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

/// A top-level grouping of keys
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    name: Option<String>,
    keys: Vec<Node>,
}

impl Section {
    /// The unnamed root section
    pub fn root() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            keys: Vec::new(),
        }
    }

    /// `None` for the root section
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    pub fn keys(&self) -> &[Node] {
        &self.keys
    }

    /// First key with exactly this name
    pub fn key(&self, name: &str) -> Option<&Node> {
        self.keys.iter().find(|key| key.name == name)
    }

    /// Root matches an absent or empty name, named sections match exactly
    pub fn matches(&self, name: Option<&str>) -> bool {
        match (self.name(), name.filter(|name| !name.is_empty())) {
            (None, None) => true,
            (Some(own), Some(wanted)) => own == wanted,
            _ => false,
        }
    }

    pub(crate) fn push_key(&mut self, key: Node) {
        self.keys.push(key);
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "[{name}]")?,
            None => writeln!(f, "[]")?,
        }
        for key in &self.keys {
            key.write_outline(f, 1)?;
        }
        Ok(())
    }
}

/// The assembled result of a parse
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub(crate) fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All sections in declaration order, root first. Empty before a parse.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn root(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            write!(f, "{section}")?;
        }
        Ok(())
    }
}
