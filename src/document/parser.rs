//! HTML parsing into a `DocumentTree`.
//!
//! Uses html5ever's built-in `RcDom` and converts the result into the arena
//! tree. Only elements and their text survive the conversion; comments,
//! doctypes and processing instructions have no place in path expressions.

use super::node::{Node, NodeId};
use super::tree::DocumentTree;
use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parses an HTML string into a `DocumentTree`.
///
/// html5ever is forgiving: fragments are wrapped in `html`/`head`/`body` the
/// same way a browser would do it.
///
/// # Example
///
/// ```
/// use xpathquill::document::parser::parse_html;
///
/// let tree = parse_html("<div id='x'><span>Hi</span></div>").unwrap();
/// let body = tree.body().unwrap();
/// let div = tree[body].children()[0];
/// assert_eq!(tree[div].id(), Some("x"));
/// ```
pub fn parse_html(html: &str) -> Result<DocumentTree> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .context("Failed to read HTML input")?;

    let mut tree = DocumentTree::new();
    convert_node(&dom.document, &mut tree, NodeId::DOCUMENT);

    tracing::debug!("parsed HTML into {} nodes", tree.len());
    Ok(tree)
}

fn convert_node(handle: &Handle, tree: &mut DocumentTree, parent: NodeId) {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let mut node = Node::new(&name.local);
            for attr in attrs.borrow().iter() {
                node.set_attribute(&attr.name.local, &attr.value);
            }
            let id = tree.append(parent, node);
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        NodeData::Text { contents } => {
            if parent == NodeId::DOCUMENT {
                return;
            }
            let text = contents.borrow().to_string();
            if let Some(node) = tree.get_mut(parent) {
                node.push_text(&text);
            }
        }
        NodeData::Doctype { .. } | NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {}
    }
}
