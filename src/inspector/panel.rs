//! The floating inspector panel's placement and hit regions.
//!
//! ```text
//! ┌ xpathquill ─────────── [-][x]┐   <- title row: drag handle + controls
//! │ …                           │
//! │ …                          ◢│   <- bottom-right cell: resize handle
//! └─────────────────────────────┘
//! ```

use super::geometry::{Point, Rect, Size};

/// Width of one title-bar control, in cells.
pub const CONTROL_WIDTH: i32 = 3;

/// Buttons in the panel's title row, right to left: close, then toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelControl {
    /// Pause or resume inspection.
    Toggle,
    /// Stop the inspector session.
    Close,
}

/// What lies under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Outside,
    DragHandle,
    Control(PanelControl),
    ResizeHandle,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub origin: Point,
    pub size: Size,
    pub min_size: Size,
}

impl Panel {
    /// Creates a panel; the size is raised to the minimum if needed.
    pub fn new(origin: Point, size: Size, min_size: Size) -> Self {
        Self {
            origin,
            size: size.max(min_size),
            min_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.origin, self.size)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Returns the screen cell of a title-bar control.
    pub fn control_rect(&self, control: PanelControl) -> Rect {
        let slot = match control {
            PanelControl::Close => 1,
            PanelControl::Toggle => 2,
        };
        // One cell of border on the right.
        let x = self.rect().right() - 1 - slot * CONTROL_WIDTH;
        Rect::new(x, self.origin.y, CONTROL_WIDTH, 1)
    }

    pub fn resize_handle(&self) -> Rect {
        let rect = self.rect();
        Rect::new(rect.right() - 1, rect.bottom() - 1, 1, 1)
    }

    pub fn hit_test(&self, point: Point) -> PanelHit {
        if !self.contains(point) {
            return PanelHit::Outside;
        }
        if self.resize_handle().contains(point) {
            return PanelHit::ResizeHandle;
        }
        for control in [PanelControl::Toggle, PanelControl::Close] {
            if self.control_rect(control).contains(point) {
                return PanelHit::Control(control);
            }
        }
        if point.y == self.origin.y {
            PanelHit::DragHandle
        } else {
            PanelHit::Body
        }
    }

    pub fn move_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Resizes from a gesture's initial size by a pointer delta, clamped to the minimum.
    pub fn resize_from(&mut self, initial: Size, delta: Point) {
        self.size = Size::new(initial.width + delta.x, initial.height + delta.y).max(self.min_size);
    }
}
