//! Keyboard event mapping and input event types.

use crate::app::mode::AppMode;
use termion::event::{Event, Key};

/// High-level input events abstracted from raw keyboard input.
///
/// These events represent user intentions (quit, move cursor, select an
/// element) rather than specific key presses, so each mode can bind keys
/// differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Move cursor down
    MoveDown,
    /// Move cursor up
    MoveUp,
    /// Jump to the first element (g)
    JumpToTop,
    /// Jump to the last element (G)
    JumpToBottom,
    /// Page down (Ctrl-f, PageDown key)
    PageDown,
    /// Page up (Ctrl-b, PageUp key)
    PageUp,
    /// Click the element under the cursor
    Select,
    /// Pause or resume inspection
    TogglePause,
    /// Start or stop the inspector
    ToggleInspector,
    /// Edit the panel's path text
    EditPath,
    /// Enter command mode
    EnterCommandMode,
    /// Exit current mode back to normal mode
    ExitMode,
    /// Copy the displayed path
    CopyPath,
    /// Copy the recorded fields as YAML
    CopyFields,
    /// Send the displayed path to the analyze service
    Analyze,
    /// Check the recorded fields against the document
    FieldReport,
    /// Toggle help overlay
    Help,
    /// Narrow through a breadcrumb (1-9)
    NarrowCrumb(usize),
    /// Narrow to a `//` path from a breadcrumb (Alt-1..9)
    DescendCrumb(usize),
    /// Insert a character while typing
    InsertCharacter(char),
    /// Backspace while typing
    InsertBackspace,
    /// Enter while typing
    InsertEnter,
    /// Move the typing cursor left
    CursorLeft,
    /// Move the typing cursor right
    CursorRight,
    /// Unknown or unmapped key
    Unknown,
}

/// Maps a termion Event to an InputEvent based on the current mode.
///
/// - Normal mode: j/k to move, Enter to select, e to edit the path, : for commands
/// - EditPath mode: every printable key edits the path, Enter applies, Esc leaves
/// - Command mode: every printable key extends the command line
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use xpathquill::app::mode::AppMode;
/// use xpathquill::input::keys::{map_key_event, InputEvent};
///
/// let event = Event::Key(Key::Char('j'));
/// assert_eq!(map_key_event(event, &AppMode::Normal), InputEvent::MoveDown);
/// ```
pub fn map_key_event(event: Event, mode: &AppMode) -> InputEvent {
    let key = match event {
        Event::Key(k) => k,
        _ => return InputEvent::Unknown,
    };

    match mode {
        AppMode::Normal => match key {
            Key::Ctrl('c') => InputEvent::Quit,
            Key::Ctrl('f') => InputEvent::PageDown,
            Key::Ctrl('b') => InputEvent::PageUp,
            Key::Char('q') => InputEvent::Quit,
            Key::Char('j') | Key::Down => InputEvent::MoveDown,
            Key::Char('k') | Key::Up => InputEvent::MoveUp,
            Key::Char('g') | Key::Home => InputEvent::JumpToTop,
            Key::Char('G') | Key::End => InputEvent::JumpToBottom,
            Key::PageDown => InputEvent::PageDown,
            Key::PageUp => InputEvent::PageUp,
            Key::Char('\n') | Key::Char(' ') => InputEvent::Select,
            Key::Char('p') => InputEvent::TogglePause,
            Key::Char('i') => InputEvent::ToggleInspector,
            Key::Char('e') | Key::Char('/') => InputEvent::EditPath,
            Key::Char(':') => InputEvent::EnterCommandMode,
            Key::Char('y') => InputEvent::CopyPath,
            Key::Char('Y') => InputEvent::CopyFields,
            Key::Char('a') => InputEvent::Analyze,
            Key::Char('f') => InputEvent::FieldReport,
            Key::Char(c @ '1'..='9') => InputEvent::NarrowCrumb(digit(c)),
            Key::Alt(c @ '1'..='9') => InputEvent::DescendCrumb(digit(c)),
            Key::Char('?') | Key::F(1) => InputEvent::Help,
            Key::Esc => InputEvent::ExitMode,
            _ => InputEvent::Unknown,
        },
        AppMode::EditPath | AppMode::Command => match key {
            Key::Esc => InputEvent::ExitMode,
            Key::Char('\n') => InputEvent::InsertEnter,
            Key::Backspace => InputEvent::InsertBackspace,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Char(c) => InputEvent::InsertCharacter(c),
            _ => InputEvent::Unknown,
        },
    }
}

/// 0-based breadcrumb index of a digit key.
fn digit(c: char) -> usize {
    (c as usize) - ('1' as usize)
}
