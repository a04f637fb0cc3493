//! Screen-space geometry shared by the panel and the highlight overlay.
//!
//! Coordinates are terminal cells. They are signed so a panel dragged past
//! the top-left edge keeps a meaningful position.

use crate::document::node::NodeId;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Per-axis maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Where elements are on screen.
///
/// Implemented by whatever renders the document; nodes that are not visible
/// have no bounding box.
pub trait Geometry {
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;
}

/// A geometry that knows nothing, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeometry;

impl Geometry for NoGeometry {
    fn bounding_box(&self, _node: NodeId) -> Option<Rect> {
        None
    }
}

impl<F> Geometry for F
where
    F: Fn(NodeId) -> Option<Rect>,
{
    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        self(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect.contains(Point::new(2, 3)));
        assert!(rect.contains(Point::new(5, 4)));
        assert!(!rect.contains(Point::new(6, 4)));
        assert!(!rect.contains(Point::new(5, 5)));
    }

    #[test]
    fn test_closure_geometry() {
        let geometry = |node: NodeId| Some(Rect::new(0, node.index() as i32, 10, 1));
        assert_eq!(geometry.bounding_box(NodeId(3)), Some(Rect::new(0, 3, 10, 1)));
        assert_eq!(NoGeometry.bounding_box(NodeId(3)), None);
    }
}
