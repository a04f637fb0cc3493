//! Host application state: the loaded document, its outline, the inspector
//! session and the keyboard modes that drive them.
//!
//! # Modules
//!
//! - `mode`: keyboard modes (normal, path editing, command line)
//! - `commands`: parsing of `:` command lines
//! - `state`: `AppState`, which routes keys and pointer events

pub mod commands;
pub mod mode;
pub mod state;

pub use mode::AppMode;
pub use state::{AppState, PointerButton};
