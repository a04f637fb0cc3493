//! Inspector mode management.
//!
//! This module provides the `InspectorMode` enum that represents what the
//! pointer currently does in xpathquill. The mode decides whether hovering and
//! clicking reach the document or are swallowed by the panel.
//!
//! # Modes
//!
//! - **Inspecting**: hover highlights and clicks generate paths
//! - **Paused**: the document is browsed without the inspector reacting
//! - **DraggingPanel**: the floating panel follows the pointer
//! - **ResizingPanel**: the floating panel's corner follows the pointer
//!
//! # Example
//!
//! ```
//! use xpathquill::inspector::mode::InspectorMode;
//!
//! let mode = InspectorMode::default();
//! assert_eq!(mode, InspectorMode::Inspecting);
//! assert_eq!(format!("{}", mode), "INSPECT");
//! assert!(InspectorMode::DraggingPanel.is_gesture());
//! ```

use std::fmt;

/// Represents the current mode of the inspector.
///
/// The mode is displayed in the status bar using the `Display`
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectorMode {
    /// Hover and click on document content are handled.
    #[default]
    Inspecting,
    /// Hover and click on document content are ignored.
    Paused,
    /// A pointer press on the panel title is moving the panel.
    DraggingPanel,
    /// A pointer press on the resize corner is resizing the panel.
    ResizingPanel,
}

impl InspectorMode {
    /// Returns true while a drag or resize gesture is in progress.
    pub fn is_gesture(self) -> bool {
        matches!(self, InspectorMode::DraggingPanel | InspectorMode::ResizingPanel)
    }
}

impl fmt::Display for InspectorMode {
    /// Formats the mode as an uppercase string suitable for the status bar.
    ///
    /// ```
    /// use xpathquill::inspector::mode::InspectorMode;
    ///
    /// assert_eq!(format!("{}", InspectorMode::Paused), "PAUSED");
    /// assert_eq!(format!("{}", InspectorMode::ResizingPanel), "RESIZE");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectorMode::Inspecting => write!(f, "INSPECT"),
            InspectorMode::Paused => write!(f, "PAUSED"),
            InspectorMode::DraggingPanel => write!(f, "DRAG"),
            InspectorMode::ResizingPanel => write!(f, "RESIZE"),
        }
    }
}
