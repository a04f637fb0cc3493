//! File I/O operations for HTML documents.
//!
//! This module provides functionality to load HTML pages from disk (plain or
//! gzipped) or stdin.

pub mod loader;
