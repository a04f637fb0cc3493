//! HTML file loading functionality.
//!
//! This module provides functions to load HTML documents from files or stdin,
//! parsing them into `DocumentTree` structures that can be inspected by
//! xpathquill. Gzip-compressed input (`.gz` files, or stdin starting with the
//! gzip magic bytes) is decompressed transparently.

use crate::document::parser::parse_html;
use crate::document::tree::DocumentTree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads and parses an HTML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use xpathquill::file::loader::load_html_file;
///
/// let tree = load_html_file("page.html").unwrap();
/// assert!(tree.root_element().is_some());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip data
/// - The content is not valid UTF-8
pub fn load_html_file<P: AsRef<Path>>(path: P) -> Result<DocumentTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    tracing::info!("loaded {} bytes from {}", content.len(), path_ref.display());
    parse_html(&content).context("Failed to parse HTML")
}

/// Loads and parses HTML from standard input.
///
/// This is useful for piping a page into the inspector, e.g.
/// `curl -s https://example.com | xpathquill`.
pub fn load_html_from_stdin() -> Result<DocumentTree> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    load_html_from_bytes(&buffer)
}

/// Parses HTML from raw bytes, decompressing gzip data when detected.
pub fn load_html_from_bytes(bytes: &[u8]) -> Result<DocumentTree> {
    // Gzip magic bytes (0x1f 0x8b)
    let content = if bytes.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(bytes)?
    } else {
        String::from_utf8(bytes.to_vec()).context("Invalid UTF-8 in input")?
    };
    parse_html(&content).context("Failed to parse HTML")
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip data from stdin")?;
    Ok(content)
}

/// A small built-in page shown when no input is given.
pub const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>xpathquill sample</title></head>
  <body>
    <header class="site-header">
      <nav>
        <a href="/">Home</a>
        <a href="/products">Products</a>
        <a href="/about">About</a>
      </nav>
    </header>
    <main id="content">
      <div class="card featured"><h2>Widget</h2><span class="price">$10</span></div>
      <div class="card"><h2>Gadget</h2><span class="price">$25</span></div>
      <div class="card"><h2>Gizmo</h2><span class="price">$40</span></div>
      <form id="login">
        <input name="user" type="text">
        <input name="password" type="password">
        <button type="submit">Sign in</button>
      </form>
    </main>
    <footer><p>Contact: <a href="mailto:team@example.com">team@example.com</a></p></footer>
  </body>
</html>
"#;

/// Parses the built-in sample page.
pub fn load_sample_page() -> Result<DocumentTree> {
    parse_html(SAMPLE_PAGE)
}
