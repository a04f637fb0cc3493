//! The element outline and its mapping to screen cells.
//!
//! This module provides:
//! - `OutlineLine`: one displayed element
//! - `OutlineState`: every element of the document in document order
//! - `OutlineGeometry`: turns outline rows into the rectangles the inspector
//!   highlights
//! - `render_tree_view`: draws the outline with cursor, hover and match styles

use crate::document::node::NodeId;
use crate::document::tree::DocumentTree;
use crate::inspector::geometry::{Geometry, Point, Rect as CellRect};
use crate::inspector::highlight::HighlightKind;
use crate::inspector::state::InspectorState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Longest own-text preview shown after a label.
const TEXT_PREVIEW_WIDTH: usize = 40;

/// Cells taken by the cursor indicator before each label.
const INDICATOR_WIDTH: usize = 2;

/// A single element line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub node: NodeId,
    /// Indentation depth (0 for the root element).
    pub depth: usize,
    /// `<tag#id.class>`
    pub label: String,
    /// The element's own text, shortened for display.
    pub text: String,
}

impl OutlineLine {
    /// Number of cells the label and text occupy.
    pub fn width(&self) -> usize {
        let text = if self.text.is_empty() {
            0
        } else {
            self.text.chars().count() + 1
        };
        self.label.chars().count() + text
    }

    /// Column of the label, relative to the left edge of the outline.
    pub fn indent(&self) -> usize {
        self.depth * 2 + INDICATOR_WIDTH
    }
}

/// Every element of a document, one line each, in document order.
#[derive(Debug, Clone, Default)]
pub struct OutlineState {
    lines: Vec<OutlineLine>,
}

impl OutlineState {
    /// Builds the outline of `tree`.
    ///
    /// ```
    /// use xpathquill::document::parser::parse_html;
    /// use xpathquill::ui::tree_view::OutlineState;
    ///
    /// let tree = parse_html("<div id='a'><p>hi</p></div>").unwrap();
    /// let outline = OutlineState::new(&tree);
    /// let labels: Vec<&str> = outline.lines().iter().map(|l| l.label.as_str()).collect();
    /// assert_eq!(labels, vec!["<html>", "<head>", "<body>", "<div#a>", "<p>"]);
    /// ```
    pub fn new(tree: &DocumentTree) -> Self {
        let lines = tree
            .descendants(tree.document())
            .into_iter()
            .map(|node| {
                let element = &tree[node];
                OutlineLine {
                    node,
                    depth: tree.depth(node),
                    label: element.label(),
                    text: shorten(element.text(), TEXT_PREVIEW_WIDTH),
                }
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[OutlineLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn node_at(&self, row: usize) -> Option<NodeId> {
        self.lines.get(row).map(|line| line.node)
    }

    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.lines.iter().position(|line| line.node == node)
    }
}

fn shorten(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(limit).collect();
        short.push('…');
        short
    }
}

/// Where each outline row currently sits on screen.
#[derive(Debug, Clone, Copy)]
pub struct OutlineGeometry<'a> {
    outline: &'a OutlineState,
    viewport: CellRect,
    scroll_offset: usize,
}

impl<'a> OutlineGeometry<'a> {
    pub fn new(outline: &'a OutlineState, viewport: CellRect, scroll_offset: usize) -> Self {
        Self {
            outline,
            viewport,
            scroll_offset,
        }
    }

    /// Returns the element drawn at a screen cell.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        if !self.viewport.contains(point) {
            return None;
        }
        let row = self.scroll_offset + (point.y - self.viewport.y) as usize;
        self.outline.node_at(row)
    }
}

impl Geometry for OutlineGeometry<'_> {
    fn bounding_box(&self, node: NodeId) -> Option<CellRect> {
        let row = self.outline.position(node)?;
        if row < self.scroll_offset {
            return None;
        }
        let visible_row = (row - self.scroll_offset) as i32;
        if visible_row >= self.viewport.height {
            return None;
        }
        let line = &self.outline.lines[row];
        Some(CellRect::new(
            self.viewport.x + line.indent() as i32,
            self.viewport.y + visible_row,
            line.width() as i32,
            1,
        ))
    }
}

/// Renders the outline.
///
/// The cursor line gets an indicator; matched elements and the hovered
/// element get a background. A primary match wins over a secondary one, and
/// both win over hover.
pub fn render_tree_view(
    f: &mut Frame,
    area: Rect,
    outline: &OutlineState,
    cursor: usize,
    scroll_offset: usize,
    inspector: Option<&InspectorState>,
    colors: &ThemeColors,
) {
    let hovered = inspector.and_then(|s| s.hover()).map(|h| h.node);

    let lines: Vec<Line> = outline
        .lines()
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(area.height as usize)
        .map(|(row, line)| {
            let is_cursor = row == cursor;
            let background = match inspector.and_then(|s| s.highlights().kind_of(line.node)) {
                Some(HighlightKind::Primary) => Some(colors.highlight_primary),
                Some(HighlightKind::Secondary) => Some(colors.highlight_secondary),
                None if hovered == Some(line.node) => Some(colors.hover),
                None => None,
            };
            outline_line(line, is_cursor, background, colors)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}

fn outline_line<'a>(
    line: &'a OutlineLine,
    is_cursor: bool,
    background: Option<Color>,
    colors: &ThemeColors,
) -> Line<'a> {
    let mut spans = vec![Span::raw("  ".repeat(line.depth))];

    if is_cursor {
        spans.push(Span::styled("▶ ", Style::default().fg(colors.cursor)));
    } else {
        spans.push(Span::raw("  "));
    }

    let mut label_style = Style::default().fg(colors.tag);
    let mut text_style = Style::default().fg(colors.text);
    if let Some(bg) = background {
        label_style = label_style.bg(bg).fg(Color::White);
        text_style = text_style.bg(bg).fg(Color::White);
    }
    if is_cursor {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    spans.push(Span::styled(line.label.as_str(), label_style));
    if !line.text.is_empty() {
        spans.push(Span::styled(format!(" {}", line.text), text_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_html;

    fn outline() -> (DocumentTree, OutlineState) {
        let tree = parse_html("<ul><li>one</li><li>two</li><li>three</li></ul>").unwrap();
        let outline = OutlineState::new(&tree);
        (tree, outline)
    }

    #[test]
    fn test_outline_follows_document_order() {
        let (tree, outline) = outline();
        assert_eq!(outline.len(), tree.len() - 1);
        let depths: Vec<usize> = outline.lines().iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 3, 3, 3]);
        assert_eq!(outline.lines()[4].text, "one");
    }

    #[test]
    fn test_long_text_is_shortened() {
        let text = "x".repeat(60);
        let tree = parse_html(&format!("<p>{}</p>", text)).unwrap();
        let outline = OutlineState::new(&tree);
        let p = &outline.lines()[3];
        assert_eq!(p.text.chars().count(), TEXT_PREVIEW_WIDTH + 1);
        assert!(p.text.ends_with('…'));
    }

    #[test]
    fn test_geometry_tracks_scrolling() {
        let (_, outline) = outline();
        let li = outline.node_at(4).unwrap();
        let viewport = CellRect::new(0, 1, 80, 3);

        let geometry = OutlineGeometry::new(&outline, viewport, 0);
        assert_eq!(geometry.bounding_box(li), None);

        let geometry = OutlineGeometry::new(&outline, viewport, 3);
        // depth 3 indent + indicator, "<li>" plus " one"
        assert_eq!(geometry.bounding_box(li), Some(CellRect::new(8, 2, 8, 1)));
        assert_eq!(geometry.node_at(Point::new(0, 2)), Some(li));
        assert_eq!(geometry.node_at(Point::new(0, 9)), None);
    }
}
