//! Arena-backed element tree for HTML documents.
//!
//! This module provides the `DocumentTree` type, which owns every node of a
//! document and hands out [`NodeId`] handles. The tree always starts with a
//! synthetic document node; the root element (`<html>` for parsed pages) is its
//! only element child.
//!
//! Derived facts such as a node's ordinal among same-tag siblings or its
//! position in document order are never cached: they are recomputed from the
//! current child lists on every call, because siblings can change between
//! calls.
//!
//! # Example
//!
//! ```
//! use xpathquill::document::node::{Node, NodeId};
//! use xpathquill::document::tree::DocumentTree;
//!
//! let mut tree = DocumentTree::new();
//! let html = tree.append(NodeId::DOCUMENT, Node::new("html"));
//! let body = tree.append(html, Node::new("body"));
//! let first = tree.append(body, Node::new("p"));
//! let second = tree.append(body, Node::new("p"));
//!
//! assert_eq!(tree.root_element(), Some(html));
//! assert_eq!(tree.body(), Some(body));
//! assert_eq!(tree.ordinal_among_same_tag(second), Some((2, 2)));
//! assert_eq!(tree.ordinal_among_same_tag(first), Some((1, 2)));
//! ```

use super::node::{Node, NodeId};
use std::ops::Index;

/// A complete HTML document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Creates a tree containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Returns the number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds nothing but the document node.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Returns the handle of the document node.
    pub fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// Returns the first element child of the document node.
    pub fn root_element(&self) -> Option<NodeId> {
        self.nodes[0].children.first().copied()
    }

    /// Returns the designated body node: the first `body` child of the root element.
    pub fn body(&self) -> Option<NodeId> {
        let root = self.root_element()?;
        self.nodes[root.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].tag == "body")
    }

    /// Returns a node by handle.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns a mutable node by handle.
    ///
    /// Structural links are kept private to the tree; use [`append_child`],
    /// [`detach`] and friends to change the shape.
    ///
    /// [`append_child`]: DocumentTree::append_child
    /// [`detach`]: DocumentTree::detach
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Adds a node to the arena without attaching it.
    pub fn create(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a node and appends it as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.create(node);
        self.append_child(parent, id);
        id
    }

    /// Moves `child` to the end of `parent`'s children, detaching it first.
    ///
    /// Attaching a node below itself or one of its descendants is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!("refusing to attach {} below its own subtree", child);
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `child` into `parent`'s children at `index` (clamped).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlinks a node from its parent. The node keeps its own subtree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Removes `child` from `parent`'s children. Returns false if it was not there.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.nodes[child.0].parent != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Returns true if `ancestor` is a proper ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Iterates over the proper ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, move |p| self.nodes[p.0].parent)
    }

    /// Returns the number of element ancestors between a node and the document.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id)
            .filter(|&a| a != NodeId::DOCUMENT)
            .count()
    }

    /// Returns the 1-based position of a node among its same-tag siblings,
    /// together with the number of such siblings.
    ///
    /// Returns `None` for parentless nodes.
    pub fn ordinal_among_same_tag(&self, id: NodeId) -> Option<(usize, usize)> {
        let parent = self.nodes[id.0].parent?;
        let tag = &self.nodes[id.0].tag;
        let mut position = None;
        let mut count = 0;
        for &sibling in &self.nodes[parent.0].children {
            if &self.nodes[sibling.0].tag == tag {
                count += 1;
                if sibling == id {
                    position = Some(count);
                }
            }
        }
        position.map(|p| (p, count))
    }

    /// Returns every descendant of a node in document (pre-)order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Returns the document-order rank of every attached node.
    ///
    /// The result is indexed by arena index; detached nodes have no rank.
    pub fn document_order(&self) -> Vec<Option<usize>> {
        let mut ranks = vec![None; self.nodes.len()];
        ranks[NodeId::DOCUMENT.0] = Some(0);
        for (rank, id) in self.descendants(NodeId::DOCUMENT).into_iter().enumerate() {
            ranks[id.0] = Some(rank + 1);
        }
        ranks
    }

    /// Concatenates the text of a node and all of its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .map(|n| self.nodes[n.0].text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Index<NodeId> for DocumentTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
