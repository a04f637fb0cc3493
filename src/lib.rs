//! XPathQuill - a terminal HTML element inspector.
//!
//! Point at an element in the document outline and xpathquill generates a
//! path that identifies it, highlights everything the path matches and lets
//! the path be refined through breadcrumbs or by hand.

pub mod analyze;
pub mod app;
pub mod config;
pub mod document;
pub mod export;
pub mod file;
pub mod input;
pub mod inspector;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod xpath;
