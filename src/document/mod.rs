//! Document model: element nodes, the arena tree, and HTML parsing.
//!
//! # Modules
//!
//! - `node`: element data (tag, attributes, own text) and `NodeId` handles
//! - `tree`: the `DocumentTree` arena with navigation helpers
//! - `parser`: html5ever-based conversion from HTML text

pub mod node;
pub mod parser;
pub mod tree;

pub use node::{Node, NodeId};
pub use tree::DocumentTree;
