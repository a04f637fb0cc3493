//! Keyboard modes of the host application.
//!
//! These are separate from `InspectorMode`: they decide what keys mean,
//! while the inspector mode decides what pointer input does.
//!
//! # Example
//!
//! ```
//! use xpathquill::app::mode::AppMode;
//!
//! let mode = AppMode::default();
//! assert_eq!(mode, AppMode::Normal);
//! assert_eq!(format!("{}", AppMode::EditPath), "EDIT");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Navigation and inspector commands.
    #[default]
    Normal,
    /// Typing into the panel's path field.
    EditPath,
    /// Typing a `:` command.
    Command,
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Normal => write!(f, "NORMAL"),
            AppMode::EditPath => write!(f, "EDIT"),
            AppMode::Command => write!(f, "COMMAND"),
        }
    }
}
