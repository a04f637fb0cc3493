//! Input event handler for polling and processing terminal events.

use super::keys::{map_key_event, InputEvent};
use crate::app::mode::AppMode;
use crate::app::state::{AppState, PointerButton};
use crate::export::CopyFormat;
use crate::inspector::geometry::Point;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use termion::event::{Event, MouseButton, MouseEvent};
use termion::input::TermRead;

/// Handles terminal input events and updates application state.
///
/// Terminal reads block, so a reader thread forwards events over a channel;
/// `poll_event` waits on the channel with a timeout, which lets the event
/// loop service the inspector's debounce deadline between key presses.
pub struct InputHandler {
    events: Receiver<io::Result<Event>>,
}

impl InputHandler {
    /// Creates a new InputHandler that reads from stdin.
    pub fn new() -> Self {
        Self {
            events: spawn_reader(io::stdin()),
        }
    }

    /// Creates a new InputHandler that reads from /dev/tty.
    /// Use this when stdin has been consumed for piped data.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: spawn_reader(tty_file),
        })
    }

    /// Waits up to `timeout` for a terminal event.
    ///
    /// Returns Some(Event) if an event occurred, None if the timeout elapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the terminal failed or the input closed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xpathquill::input::InputHandler;
    /// use std::time::Duration;
    ///
    /// let mut handler = InputHandler::new();
    /// let event = handler.poll_event(Duration::from_millis(100)).unwrap();
    /// ```
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event?)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!("Terminal input closed")),
        }
    }

    /// Handles a terminal event and updates application state.
    ///
    /// Returns Ok(true) if the application should quit.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xpathquill::app::AppState;
    /// use xpathquill::analyze::HttpAnalyzer;
    /// use xpathquill::config::Config;
    /// use xpathquill::export::MemoryClipboard;
    /// use xpathquill::file::loader::load_sample_page;
    /// use xpathquill::input::InputHandler;
    /// use std::time::Duration;
    /// use termion::event::{Event, Key};
    ///
    /// let config = Config::default();
    /// let analyzer = HttpAnalyzer::new(&config.analyze_endpoint, config.analyze_timeout()).unwrap();
    /// let mut state = AppState::new(
    ///     load_sample_page().unwrap(),
    ///     config,
    ///     Box::new(analyzer),
    ///     Box::new(MemoryClipboard::default()),
    /// );
    /// let mut handler = InputHandler::new();
    /// let should_quit = handler.handle_event(Event::Key(Key::Char('q')), &mut state).unwrap();
    /// assert!(should_quit);
    /// ```
    pub fn handle_event(&mut self, event: Event, state: &mut AppState) -> Result<bool> {
        if let Event::Mouse(mouse_event) = event {
            if state.config().enable_mouse {
                handle_mouse(mouse_event, state);
            }
            return Ok(false);
        }

        let input = map_key_event(event, &state.mode());
        Ok(handle_input(input, state))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: R) -> Receiver<io::Result<Event>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for event in source.events() {
            if sender.send(event).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Applies a decoded input event. Returns true if the application should quit.
pub fn handle_input(input: InputEvent, state: &mut AppState) -> bool {
    if state.show_help() {
        if matches!(input, InputEvent::Help | InputEvent::ExitMode) {
            state.toggle_help();
        }
        return false;
    }

    match state.mode() {
        AppMode::Normal => match input {
            InputEvent::Quit => return true,
            InputEvent::MoveDown => state.move_cursor(1),
            InputEvent::MoveUp => state.move_cursor(-1),
            InputEvent::JumpToTop => state.jump_to_top(),
            InputEvent::JumpToBottom => state.jump_to_bottom(),
            InputEvent::PageDown => state.page(true),
            InputEvent::PageUp => state.page(false),
            InputEvent::Select => state.select(),
            InputEvent::TogglePause => state.toggle_pause(),
            InputEvent::ToggleInspector => state.toggle_inspector(),
            InputEvent::EditPath => state.start_edit(),
            InputEvent::EnterCommandMode => state.start_command(),
            InputEvent::ExitMode => state.exit_mode(),
            InputEvent::CopyPath => state.copy(CopyFormat::Plain),
            InputEvent::CopyFields => state.copy(CopyFormat::KeyValue),
            InputEvent::Analyze => state.analyze(),
            InputEvent::FieldReport => state.run_field_report(),
            InputEvent::Help => state.toggle_help(),
            InputEvent::NarrowCrumb(index) => state.activate_breadcrumb(index, false),
            InputEvent::DescendCrumb(index) => state.activate_breadcrumb(index, true),
            _ => {}
        },
        AppMode::EditPath => match input {
            InputEvent::ExitMode => state.exit_mode(),
            InputEvent::InsertEnter => state.edit_confirm(),
            InputEvent::InsertBackspace => state.edit_backspace(),
            InputEvent::CursorLeft => state.edit_left(),
            InputEvent::CursorRight => state.edit_right(),
            InputEvent::InsertCharacter(c) => state.edit_insert(c),
            _ => {}
        },
        AppMode::Command => match input {
            InputEvent::ExitMode => state.exit_mode(),
            InputEvent::InsertEnter => return state.execute_command_line(),
            InputEvent::InsertBackspace => state.command_backspace(),
            InputEvent::InsertCharacter(c) => state.command_insert(c),
            _ => {}
        },
    }
    false
}

/// Termion reports 1-based cells.
fn cell(x: u16, y: u16) -> Point {
    Point::new(i32::from(x) - 1, i32::from(y) - 1)
}

fn handle_mouse(event: MouseEvent, state: &mut AppState) {
    match event {
        MouseEvent::Press(MouseButton::Left, x, y) => {
            state.pointer_press(cell(x, y), PointerButton::Primary)
        }
        MouseEvent::Press(MouseButton::Right, x, y) => {
            state.pointer_press(cell(x, y), PointerButton::Secondary)
        }
        MouseEvent::Press(MouseButton::WheelDown, _, _) => state.wheel(true),
        MouseEvent::Press(MouseButton::WheelUp, _, _) => state.wheel(false),
        MouseEvent::Press(..) => {}
        MouseEvent::Hold(x, y) => state.pointer_hold(cell(x, y)),
        MouseEvent::Release(..) => state.pointer_release(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{AnalyzeError, AnalyzeRequest, Analyzer};
    use crate::config::Config;
    use crate::document::parser::parse_html;
    use crate::export::MemoryClipboard;
    use crate::inspector::geometry::{Rect, Size};

    struct Offline;

    impl Analyzer for Offline {
        fn analyze(&self, _: &AnalyzeRequest) -> std::result::Result<serde_json::Value, AnalyzeError> {
            Err(AnalyzeError::Transport("offline".into()))
        }
    }

    fn state(config: Config) -> AppState {
        let tree = parse_html("<div><span>a</span><span>b</span></div>").unwrap();
        let mut state = AppState::new(
            tree,
            config,
            Box::new(Offline),
            Box::new(MemoryClipboard::default()),
        );
        state.layout(Rect::new(0, 0, 100, 30), Size::new(100, 32));
        state
    }

    #[test]
    fn test_typing_a_path() {
        let mut state = state(Config::default());
        handle_input(InputEvent::EditPath, &mut state);
        assert_eq!(state.mode(), AppMode::EditPath);
        for c in "//span".chars() {
            // 'p' pauses in normal mode; here it is text
            assert!(!handle_input(InputEvent::InsertCharacter(c), &mut state));
        }
        handle_input(InputEvent::InsertEnter, &mut state);
        assert_eq!(state.mode(), AppMode::Normal);
        assert_eq!(state.inspector().unwrap().matches().len(), 2);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut state = state(Config::default());
        handle_input(InputEvent::Help, &mut state);
        assert!(state.show_help());
        assert!(!handle_input(InputEvent::Quit, &mut state));
        handle_input(InputEvent::ExitMode, &mut state);
        assert!(!state.show_help());
    }

    #[test]
    fn test_command_mode_quit() {
        let mut state = state(Config::default());
        handle_input(InputEvent::EnterCommandMode, &mut state);
        handle_input(InputEvent::InsertCharacter('q'), &mut state);
        assert!(handle_input(InputEvent::InsertEnter, &mut state));
    }

    #[test]
    fn test_backspace_on_empty_command_leaves_mode() {
        let mut state = state(Config::default());
        handle_input(InputEvent::EnterCommandMode, &mut state);
        handle_input(InputEvent::InsertBackspace, &mut state);
        assert_eq!(state.mode(), AppMode::Normal);
    }

    #[test]
    fn test_mouse_ignored_when_disabled() {
        let config = Config {
            enable_mouse: false,
            ..Config::default()
        };
        let mut state = state(config);
        let mut handler = InputHandler {
            events: mpsc::channel().1,
        };
        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 3, 5));
        assert!(!handler.handle_event(click, &mut state).unwrap());
        assert!(state.inspector().unwrap().path_text().is_empty());
    }

    #[test]
    fn test_mouse_click_selects_row() {
        let mut state = state(Config::default());
        let mut handler = InputHandler {
            events: mpsc::channel().1,
        };
        // 1-based row 5 is outline row 4: the first <span>
        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 3, 5));
        handler.handle_event(click, &mut state).unwrap();
        assert_eq!(state.cursor(), 4);
        assert_eq!(state.inspector().unwrap().path_text(), "/html/body/div/span[1]");
    }

    #[test]
    fn test_poll_reports_closed_input() {
        let (sender, receiver) = mpsc::channel();
        drop(sender);
        let mut handler = InputHandler { events: receiver };
        assert!(handler.poll_event(Duration::from_millis(1)).is_err());
    }
}
