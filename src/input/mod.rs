//! Input handling: key mapping, mouse events and the terminal reader.

pub mod handler;
pub mod keys;

pub use handler::InputHandler;
pub use keys::InputEvent;
