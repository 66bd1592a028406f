//! Tree structure produced by the tag-soup parser.
//!
//! A [`Node`] is one element: a lowercased tag name, its attributes and its
//! ordered children. Text lives in [`Child::Text`]. The synthetic `document`
//! root owns the whole tree; parents are implied by position, so there are no
//! back-references and the renderer only ever walks top-down.

use indexmap::IndexMap;

use crate::utilities::{ascii_lowercase, is_void};

/// Tag name of the synthetic root the parser hangs everything off.
pub const DOCUMENT_TAG: &str = "document";

/// A child of a [`Node`]: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// Nested element
    Element(Node),
    /// Raw text exactly as it appeared in the source (entities undecoded)
    Text(String),
}

impl Child {
    /// The element, if this child is one
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    /// The text, if this child is a text run
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }
}

/// An element in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Lowercased tag name ("document" for the root)
    name: String,

    /// Attributes in source order. Keys are unique; a bare attribute maps to "".
    attributes: IndexMap<String, String>,

    /// Child nodes in document order
    children: Vec<Child>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            name: tag_name.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create the synthetic root of a parsed document
    pub fn document() -> Self {
        Self::element(DOCUMENT_TAG)
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value by name (case-insensitive; keys are stored lowercased)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&*ascii_lowercase(name))
            .map(String::as_str)
    }

    /// Attribute value, or "" when absent
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or_default()
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Iterate attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute. A repeated key keeps its original position.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Get all child nodes
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_element)
    }

    /// Append a child element. Void elements never take children, so the
    /// call is a no-op for them.
    pub fn add_child(&mut self, child: Node) {
        if !self.is_void_element() {
            self.children.push(Child::Element(child));
        }
    }

    /// Append a text run. Empty text is dropped.
    pub fn add_text(&mut self, text: &str) {
        if !text.is_empty() && !self.is_void_element() {
            self.children.push(Child::Text(text.to_string()));
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Check if this is a void element
    pub fn is_void_element(&self) -> bool {
        is_void(&self.name)
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in &node.children {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(el) => collect_text(el, out),
        }
    }
}
