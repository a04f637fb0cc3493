//! The interactive inspector: modes, panel, highlights and debounced editing.
//!
//! `InspectorState` is the central piece; the other modules are the small
//! value types it is built from.

pub mod debounce;
pub mod geometry;
pub mod highlight;
pub mod mode;
pub mod panel;
pub mod selection;
pub mod session;
pub mod state;

pub use geometry::{Geometry, Point, Rect, Size};
pub use mode::InspectorMode;
pub use session::{InspectorHost, SessionError};
pub use state::{Disposition, InspectorState, Message, MessageLevel};
