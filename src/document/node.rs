//! Element node representation for HTML documents.
//!
//! This module provides the core data structures for representing HTML elements
//! in xpathquill. Nodes live in an arena owned by
//! [`DocumentTree`](crate::document::tree::DocumentTree) and refer to each other
//! through [`NodeId`] handles: children are owned top-down by the tree, and the
//! parent link is only used for navigation.
//!
//! # Example
//!
//! ```
//! use xpathquill::document::node::Node;
//!
//! let mut node = Node::new("div");
//! node.set_attribute("id", "main");
//! node.set_attribute("class", "card featured");
//!
//! assert_eq!(node.id(), Some("main"));
//! assert_eq!(node.classes(), vec!["card", "featured"]);
//! ```

use indexmap::IndexMap;
use std::fmt;

/// Tag name used for the synthetic document node at the top of every tree.
pub const DOCUMENT_TAG: &str = "#document";

/// Handle to a node stored in a [`DocumentTree`](crate::document::tree::DocumentTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always the first node in the arena.
    pub const DOCUMENT: NodeId = NodeId(0);

    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element in the document tree.
///
/// `Node` stores the tag name, the attribute bag, the node's own text, and the
/// structural links. The identifier and class tokens are derived from the
/// `id` and `class` attributes instead of being stored twice, so an attribute
/// update is always reflected by [`Node::id`] and [`Node::classes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) text: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Creates a detached node with the given tag name.
    ///
    /// Tag names are stored lowercase, matching how HTML parsers report them.
    ///
    /// # Example
    ///
    /// ```
    /// use xpathquill::document::node::Node;
    ///
    /// let node = Node::new("SPAN");
    /// assert_eq!(node.tag(), "span");
    /// assert!(node.parent().is_none());
    /// ```
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Creates the synthetic document node.
    pub(crate) fn document() -> Self {
        Self {
            tag: DOCUMENT_TAG.to_string(),
            attributes: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Builder-style helper that sets an attribute and returns the node.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style helper that sets the node's own text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Returns the lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns true for the synthetic document node.
    pub fn is_document(&self) -> bool {
        self.tag == DOCUMENT_TAG
    }

    /// Returns the value of the `id` attribute, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Returns the class tokens in attribute order. Repeated tokens are kept.
    pub fn classes(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Looks up an attribute. Missing keys are simply absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns all attributes in document order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Sets (or replaces) an attribute value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Returns the node's own text (text children only, not descendants).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the node's own text. Whitespace runs are collapsed.
    pub fn set_text(&mut self, text: &str) {
        self.text = normalize_whitespace(text);
    }

    /// Appends a text fragment to the node's own text.
    pub(crate) fn push_text(&mut self, fragment: &str) {
        let fragment = normalize_whitespace(fragment);
        if fragment.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&fragment);
    }

    /// Returns the child handles in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the parent handle, if the node is attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if this element is a hyperlink.
    pub fn is_hyperlink(&self) -> bool {
        self.tag == "a"
    }

    /// Returns the hyperlink destination when it can actually be followed.
    ///
    /// Empty destinations and `javascript:` pseudo-URLs are not resolvable.
    pub fn link_destination(&self) -> Option<&str> {
        if !self.is_hyperlink() {
            return None;
        }
        let href = self.attribute("href")?.trim();
        if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
            None
        } else {
            Some(href)
        }
    }

    /// Short `<tag#id.class>` label used by the outline and status line.
    pub fn label(&self) -> String {
        let mut label = format!("<{}", self.tag);
        if let Some(id) = self.id() {
            label.push('#');
            label.push_str(id);
        }
        for class in self.classes() {
            label.push('.');
            label.push_str(class);
        }
        label.push('>');
        label
    }
}

/// Collapses whitespace runs into single spaces and trims the ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
