//! Application state for the terminal host.
//!
//! `AppState` owns the document, its outline and the single `InspectorHost`.
//! Keyboard and pointer input arrive here already decoded; everything that
//! concerns paths is forwarded to the running `InspectorState` together with
//! the tree and the outline's current screen geometry.

use super::commands::Command;
use super::mode::AppMode;
use crate::analyze::Analyzer;
use crate::config::Config;
use crate::document::tree::DocumentTree;
use crate::export::{ClipboardSink, CopyFormat, FieldReport};
use crate::inspector::geometry::{Geometry, Point, Rect, Size};
use crate::inspector::panel::PanelHit;
use crate::inspector::state::{Disposition, InspectorState, Message, MessageLevel};
use crate::inspector::InspectorHost;
use crate::theme::{get_builtin_theme, list_builtin_themes};
use crate::ui::panel::{visible_crumb_at, CrumbTarget, BREADCRUMB_ROW};
use crate::ui::tree_view::{OutlineGeometry, OutlineState};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Mouse buttons the host distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    /// Acts as the breadcrumb modifier: narrow to a `//` path.
    Secondary,
}

/// Rows moved per wheel notch.
const WHEEL_STEP: isize = 3;

pub struct AppState {
    tree: DocumentTree,
    outline: OutlineState,
    host: InspectorHost,
    config: Config,
    mode: AppMode,
    cursor: usize,
    scroll_offset: usize,
    viewport: Rect,
    place_panel: bool,
    edit_buffer: String,
    edit_cursor: usize,
    command_buffer: String,
    filename: Option<String>,
    source_url: String,
    message: Option<Message>,
    report: Vec<FieldReport>,
    analyzer: Box<dyn Analyzer>,
    clipboard: Box<dyn ClipboardSink>,
    pending_theme: Option<String>,
    show_help: bool,
}

impl AppState {
    /// Creates the host state and starts an inspector session.
    pub fn new(
        tree: DocumentTree,
        config: Config,
        analyzer: Box<dyn Analyzer>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let outline = OutlineState::new(&tree);
        let mut host = InspectorHost::new();
        let place_panel = host.start(&config).is_ok();
        Self {
            tree,
            outline,
            host,
            config,
            mode: AppMode::Normal,
            cursor: 0,
            scroll_offset: 0,
            viewport: Rect::default(),
            place_panel,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            filename: None,
            source_url: String::new(),
            message: None,
            report: Vec::new(),
            analyzer,
            clipboard,
            pending_theme: None,
            show_help: false,
        }
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn outline(&self) -> &OutlineState {
        &self.outline
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn inspector(&self) -> Option<&InspectorState> {
        self.host.active()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Cursor position in the edit buffer, in characters.
    pub fn edit_cursor(&self) -> usize {
        self.edit_cursor
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: String) {
        self.filename = Some(filename);
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn set_source_url(&mut self, url: String) {
        self.source_url = url;
    }

    pub fn report(&self) -> &[FieldReport] {
        &self.report
    }

    /// The host's own message if there is one, else the inspector's.
    pub fn message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or_else(|| self.host.active().and_then(InspectorState::message))
    }

    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        if let Some(session) = self.host.active_mut() {
            session.clear_message();
        }
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn take_pending_theme(&mut self) -> Option<String> {
        self.pending_theme.take()
    }

    /// Geometry of the outline as last laid out.
    pub fn geometry(&self) -> OutlineGeometry<'_> {
        OutlineGeometry::new(&self.outline, self.viewport, self.scroll_offset)
    }

    /// Runs `f` against the active session with the tree and current geometry.
    ///
    /// Clears the host message first so the inspector's own message shows.
    fn with_session<R>(
        &mut self,
        f: impl FnOnce(&mut InspectorState, &DocumentTree, &dyn Geometry) -> R,
    ) -> Option<R> {
        let geometry = OutlineGeometry::new(&self.outline, self.viewport, self.scroll_offset);
        let Some(session) = self.host.active_mut() else {
            self.message = Some(Message {
                text: "Inspector is not running (press i to start)".to_string(),
                level: MessageLevel::Warning,
            });
            return None;
        };
        self.message = None;
        Some(f(session, &self.tree, &geometry))
    }

    /// Records where the outline is drawn and keeps the cursor visible.
    ///
    /// Called by the renderer before each frame.
    pub fn layout(&mut self, viewport: Rect, screen: Size) {
        self.viewport = viewport;
        self.adjust_scroll();
        if self.place_panel {
            if let Some(session) = self.host.active_mut() {
                session.place_panel(screen);
            }
            self.place_panel = false;
        }
    }

    fn adjust_scroll(&mut self) {
        let height = self.viewport.height.max(1) as usize;
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Moves the outline cursor and hovers the element under it.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.outline.is_empty() {
            return;
        }
        let last = self.outline.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.adjust_scroll();
        self.hover_cursor();
    }

    pub fn jump_to_top(&mut self) {
        self.move_cursor(-(self.cursor as isize));
    }

    pub fn jump_to_bottom(&mut self) {
        self.move_cursor(self.outline.len() as isize);
    }

    pub fn page(&mut self, down: bool) {
        let height = self.viewport.height.max(1) as isize;
        self.move_cursor(if down { height } else { -height });
    }

    fn hover_cursor(&mut self) {
        let Some(node) = self.outline.node_at(self.cursor) else {
            return;
        };
        let geometry = OutlineGeometry::new(&self.outline, self.viewport, self.scroll_offset);
        if let Some(session) = self.host.active_mut() {
            session.pointer_enter(node, &geometry);
        }
    }

    /// Clicks the element under the cursor.
    pub fn select(&mut self) {
        let Some(node) = self.outline.node_at(self.cursor) else {
            return;
        };
        let disposition = self.with_session(|session, tree, geometry| {
            session.click(node, tree, geometry)
        });
        if disposition == Some(Disposition::PassThrough) {
            self.set_message(
                "Inspection is paused (press p to resume)".to_string(),
                MessageLevel::Info,
            );
        }
    }

    /// Starts the inspector if it is stopped and stops it otherwise.
    pub fn toggle_inspector(&mut self) {
        if self.mode == AppMode::EditPath {
            self.mode = AppMode::Normal;
        }
        if self.host.toggle(&self.config) {
            self.place_panel = true;
            self.set_message("Inspector started".to_string(), MessageLevel::Info);
        } else {
            self.report.clear();
            self.set_message("Inspector stopped".to_string(), MessageLevel::Info);
        }
    }

    pub fn toggle_pause(&mut self) {
        if let Some(mode) = self.with_session(|session, _, _| session.toggle_inspection()) {
            self.set_message(format!("Inspector: {}", mode), MessageLevel::Info);
        }
    }

    /// Enters path editing with the displayed path in the buffer.
    pub fn start_edit(&mut self) {
        let Some(path) = self.host.active().map(|s| s.path_text().to_string()) else {
            self.set_message(
                "Inspector is not running (press i to start)".to_string(),
                MessageLevel::Warning,
            );
            return;
        };
        self.edit_cursor = path.chars().count();
        self.edit_buffer = path;
        self.mode = AppMode::EditPath;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.edit_buffer
            .char_indices()
            .nth(chars)
            .map_or(self.edit_buffer.len(), |(i, _)| i)
    }

    fn push_edit(&mut self) {
        let text = self.edit_buffer.clone();
        self.with_session(|session, _, _| session.edit_path(&text, Instant::now()));
    }

    pub fn edit_insert(&mut self, c: char) {
        let at = self.byte_offset(self.edit_cursor);
        self.edit_buffer.insert(at, c);
        self.edit_cursor += 1;
        self.push_edit();
    }

    pub fn edit_backspace(&mut self) {
        if self.edit_cursor == 0 {
            return;
        }
        self.edit_cursor -= 1;
        let at = self.byte_offset(self.edit_cursor);
        self.edit_buffer.remove(at);
        self.push_edit();
    }

    pub fn edit_left(&mut self) {
        self.edit_cursor = self.edit_cursor.saturating_sub(1);
    }

    pub fn edit_right(&mut self) {
        self.edit_cursor = (self.edit_cursor + 1).min(self.edit_buffer.chars().count());
    }

    /// Applies the edited path at once and leaves editing.
    pub fn edit_confirm(&mut self) {
        let text = self.edit_buffer.clone();
        self.with_session(|session, tree, geometry| {
            session.set_path_text(&text);
            session.confirm(tree, geometry);
        });
        self.mode = AppMode::Normal;
    }

    pub fn start_command(&mut self) {
        self.command_buffer.clear();
        self.mode = AppMode::Command;
    }

    pub fn command_insert(&mut self, c: char) {
        self.command_buffer.push(c);
    }

    pub fn command_backspace(&mut self) {
        if self.command_buffer.pop().is_none() {
            self.mode = AppMode::Normal;
        }
    }

    /// Leaves editing or the command line. A pending path edit still applies.
    pub fn exit_mode(&mut self) {
        if self.mode == AppMode::Normal {
            self.clear_message();
        }
        self.mode = AppMode::Normal;
        self.command_buffer.clear();
    }

    /// Runs the command line. Returns true if the application should quit.
    pub fn execute_command_line(&mut self) -> bool {
        let line = std::mem::take(&mut self.command_buffer);
        self.mode = AppMode::Normal;
        match Command::parse(&line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                self.set_message(e, MessageLevel::Error);
                false
            }
        }
    }

    /// Runs a command. Returns true if the application should quit.
    pub fn execute(&mut self, command: Command) -> bool {
        tracing::debug!("command {:?}", command);
        match command {
            Command::Quit => return true,
            Command::Field(name) => {
                self.with_session(|session, _, _| session.capture_field(&name));
            }
            Command::Unfield(name) => {
                let removed = self
                    .host
                    .active_mut()
                    .and_then(|session| session.forget_field(&name));
                match removed {
                    Some(_) => self.set_message(format!("Removed field '{}'", name), MessageLevel::Info),
                    None => self.set_message(format!("No field '{}'", name), MessageLevel::Error),
                }
            }
            Command::Fields => self.run_field_report(),
            Command::Write(path) => match self.write_fields(&path) {
                Ok(count) => self.set_message(
                    format!("Wrote {} field(s) to {}", count, path),
                    MessageLevel::Info,
                ),
                Err(e) => self.set_message(format!("{:#}", e), MessageLevel::Error),
            },
            Command::Narrow(index) => self.activate_breadcrumb(index, false),
            Command::Descend(index) => self.activate_breadcrumb(index, true),
            Command::RemoveOrdinal(index) => self.remove_ordinal(index),
            Command::Inspect => self.toggle_inspector(),
            Command::Themes => self.set_message(
                format!("Themes: {}", list_builtin_themes().join(", ")),
                MessageLevel::Info,
            ),
            Command::Theme(name) => {
                if get_builtin_theme(&name).is_some() {
                    self.set_message(format!("Switched to theme: {}", name), MessageLevel::Info);
                    self.pending_theme = Some(name);
                } else {
                    self.set_message(
                        format!("Unknown theme: {} (use :theme to list)", name),
                        MessageLevel::Error,
                    );
                }
            }
            Command::Url(url) => {
                self.set_message(format!("Analyze URL set to {}", url), MessageLevel::Info);
                self.source_url = url;
            }
            Command::Mouse(enabled) => {
                self.config.enable_mouse = enabled;
                let state = if enabled { "enabled" } else { "disabled" };
                self.set_message(format!("Mouse support {}", state), MessageLevel::Info);
            }
        }
        false
    }

    fn write_fields(&self, path: &str) -> Result<usize> {
        let session = self
            .host
            .active()
            .context("Inspector is not running")?;
        let fields = session.fields();
        if fields.is_empty() {
            anyhow::bail!("No fields recorded");
        }
        let yaml = fields.to_yaml()?;
        std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path))?;
        Ok(fields.len())
    }

    pub fn activate_breadcrumb(&mut self, index: usize, descendant: bool) {
        let applied = self.with_session(|session, tree, geometry| {
            session.activate_breadcrumb(index, descendant, tree, geometry)
        });
        if applied == Some(false) {
            self.set_message(format!("Breadcrumb {} cannot be used", index + 1), MessageLevel::Warning);
        }
    }

    pub fn remove_ordinal(&mut self, index: usize) {
        let applied = self.with_session(|session, tree, geometry| {
            session.remove_ordinal(index, tree, geometry)
        });
        if applied == Some(false) {
            self.set_message(format!("Breadcrumb {} has no position", index + 1), MessageLevel::Warning);
        }
    }

    pub fn copy(&mut self, format: CopyFormat) {
        let clipboard = &mut *self.clipboard;
        match self.host.active_mut() {
            Some(session) => {
                self.message = None;
                session.copy_path(clipboard, format);
            }
            None => self.set_message("Nothing to copy".to_string(), MessageLevel::Warning),
        }
    }

    pub fn analyze(&mut self) {
        let analyzer = &*self.analyzer;
        let url = self.source_url.as_str();
        match self.host.active_mut() {
            Some(session) => {
                self.message = None;
                session.analyze(analyzer, url);
            }
            None => self.set_message("Inspector is not running".to_string(), MessageLevel::Warning),
        }
    }

    pub fn run_field_report(&mut self) {
        let Some(session) = self.host.active() else {
            return;
        };
        if session.fields().is_empty() {
            self.set_message("No fields recorded".to_string(), MessageLevel::Warning);
            return;
        }
        self.report = session.field_report(&self.tree);
        let failing = self
            .report
            .iter()
            .filter(|r| !matches!(r.outcome, crate::export::FieldOutcome::Matched { .. }))
            .count();
        let level = if failing == 0 {
            MessageLevel::Info
        } else {
            MessageLevel::Warning
        };
        self.set_message(
            format!("{} field(s) checked, {} without a match", self.report.len(), failing),
            level,
        );
    }

    /// Handles a mouse button press at a screen cell.
    pub fn pointer_press(&mut self, point: Point, button: PointerButton) {
        if let Some(session) = self.host.active() {
            if session.panel().contains(point) || session.mode().is_gesture() {
                self.press_panel(point, button);
                return;
            }
        }

        let Some(node) = self.geometry().node_at(point) else {
            return;
        };
        if let Some(row) = self.outline.position(node) {
            self.cursor = row;
        }
        if self.mode == AppMode::EditPath {
            self.mode = AppMode::Normal;
        }
        match button {
            PointerButton::Primary if self.host.is_active() => self.select(),
            _ => self.hover_cursor(),
        }
    }

    fn press_panel(&mut self, point: Point, button: PointerButton) {
        let Some(session) = self.host.active_mut() else {
            return;
        };
        let rect = session.panel().rect();
        let origin = rect.origin();
        let hit = session.pointer_press(point);
        if self.host.stop_if_closed() {
            self.mode = AppMode::Normal;
            self.report.clear();
            self.set_message("Inspector closed".to_string(), MessageLevel::Info);
            return;
        }
        if hit != PanelHit::Body || point.y != origin.y + BREADCRUMB_ROW {
            return;
        }

        let target = self
            .host
            .active()
            .and_then(|s| s.breadcrumbs())
            .and_then(|crumbs| visible_crumb_at(crumbs, point.x - origin.x - 1, rect.width - 2));
        match target {
            Some(CrumbTarget::Narrow(index)) => {
                self.activate_breadcrumb(index, button == PointerButton::Secondary)
            }
            Some(CrumbTarget::RemoveOrdinal(index)) => self.remove_ordinal(index),
            None => {}
        }
    }

    /// Handles pointer motion with a button held.
    pub fn pointer_hold(&mut self, point: Point) {
        if let Some(session) = self.host.active_mut() {
            session.pointer_move(point);
        }
    }

    pub fn pointer_release(&mut self) {
        if let Some(session) = self.host.active_mut() {
            session.pointer_release();
        }
    }

    pub fn wheel(&mut self, down: bool) {
        self.move_cursor(if down { WHEEL_STEP } else { -WHEEL_STEP });
    }

    /// Services the debounce deadline and a pending close.
    ///
    /// Returns true if the screen needs redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.host.stop_if_closed() {
            self.mode = AppMode::Normal;
            return true;
        }
        let geometry = OutlineGeometry::new(&self.outline, self.viewport, self.scroll_offset);
        match self.host.active_mut() {
            Some(session) => session.tick(now, &self.tree, &geometry),
            None => false,
        }
    }

    /// How long the event loop may sleep before the next `tick` is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.host.active().and_then(|s| s.time_until_due(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{AnalyzeError, AnalyzeRequest};
    use crate::document::parser::parse_html;
    use crate::export::{ClipboardError, MemoryClipboard};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Offline;

    impl Analyzer for Offline {
        fn analyze(&self, _: &AnalyzeRequest) -> std::result::Result<serde_json::Value, AnalyzeError> {
            Err(AnalyzeError::Transport("offline".into()))
        }
    }

    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<MemoryClipboard>>);

    impl ClipboardSink for SharedClipboard {
        fn set_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
            self.0.borrow_mut().set_text(text)
        }
    }

    const PAGE: &str = r#"<ul id="menu"><li>one</li><li>two</li></ul><p class="note">hi</p>"#;

    fn app() -> (AppState, SharedClipboard) {
        let clipboard = SharedClipboard::default();
        let tree = parse_html(PAGE).unwrap();
        let mut app = AppState::new(tree, Config::default(), Box::new(Offline), Box::new(clipboard.clone()));
        app.layout(Rect::new(0, 0, 80, 20), Size::new(80, 22));
        (app, clipboard)
    }

    #[test]
    fn test_starts_with_inspector() {
        let (app, _) = app();
        assert!(app.inspector().is_some());
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn test_cursor_select_generates_path() {
        let (mut app, _) = app();
        // html, head, body, ul, li, li, p
        app.move_cursor(5);
        assert!(app.inspector().unwrap().hover().is_some());
        app.select();
        let session = app.inspector().unwrap();
        assert_eq!(session.path_text(), "/html/body/ul/li[2]");
        assert_eq!(session.matches().len(), 1);
        assert_eq!(app.message().unwrap().text, "1 match");
    }

    #[test]
    fn test_cursor_is_clamped() {
        let (mut app, _) = app();
        app.move_cursor(-4);
        assert_eq!(app.cursor(), 0);
        app.jump_to_bottom();
        assert_eq!(app.cursor(), app.outline().len() - 1);
    }

    #[test]
    fn test_edit_is_debounced() {
        let (mut app, _) = app();
        app.start_edit();
        for c in "//li".chars() {
            app.edit_insert(c);
        }
        assert!(app.inspector().unwrap().is_edit_pending());
        assert!(app.inspector().unwrap().matches().is_empty());
        assert!(app.tick(Instant::now() + Duration::from_secs(1)));
        assert_eq!(app.inspector().unwrap().matches().len(), 2);
    }

    #[test]
    fn test_edit_confirm_applies_at_once() {
        let (mut app, _) = app();
        app.start_edit();
        for c in "//p]".chars() {
            app.edit_insert(c);
        }
        app.edit_backspace();
        app.edit_confirm();
        assert_eq!(app.mode(), AppMode::Normal);
        let session = app.inspector().unwrap();
        assert!(!session.is_edit_pending());
        assert_eq!(session.path_text(), "//p");
        assert_eq!(session.matches().len(), 1);
    }

    #[test]
    fn test_edit_cursor_moves_by_characters() {
        let (mut app, _) = app();
        app.start_edit();
        app.edit_insert('é');
        app.edit_insert('b');
        app.edit_left();
        app.edit_insert('a');
        assert_eq!(app.edit_buffer(), "éab");
        assert_eq!(app.edit_cursor(), 2);
    }

    #[test]
    fn test_commands() {
        let (mut app, clipboard) = app();
        app.move_cursor(3);
        app.select();
        assert_eq!(app.inspector().unwrap().path_text(), r#"//*[@id="menu"]"#);

        app.start_command();
        for c in "field menu".chars() {
            app.command_insert(c);
        }
        assert!(!app.execute_command_line());
        assert_eq!(app.inspector().unwrap().fields().len(), 1);

        app.execute(Command::Fields);
        assert_eq!(app.report().len(), 1);

        app.copy(CopyFormat::KeyValue);
        assert!(clipboard.0.borrow().last().unwrap().starts_with("menu: "));

        assert!(app.execute(Command::Quit));
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let (mut app, _) = app();
        app.start_command();
        app.command_insert('z');
        app.execute_command_line();
        assert_eq!(app.message().unwrap().level, MessageLevel::Error);
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn test_outline_click_selects() {
        let (mut app, _) = app();
        // the <p> row; away from the panel in the bottom-right corner
        app.pointer_press(Point::new(2, 6), PointerButton::Primary);
        assert_eq!(app.cursor(), 6);
        assert_eq!(
            app.inspector().unwrap().path_text(),
            r#"//*[contains(@class,"note")]"#
        );
    }

    #[test]
    fn test_breadcrumb_click_narrows() {
        let (mut app, _) = app();
        app.move_cursor(4);
        app.select();
        assert_eq!(app.inspector().unwrap().path_text(), "/html/body/ul/li[1]");

        let origin = app.inspector().unwrap().panel().origin;
        let row = origin.y + BREADCRUMB_ROW;
        // "/html/body/ul/li[1]×": column 11 is "ul"
        app.pointer_press(Point::new(origin.x + 1 + 11, row), PointerButton::Primary);
        assert_eq!(app.inspector().unwrap().path_text(), "/html/body/ul");

        app.execute(Command::Descend(2));
        assert_eq!(app.inspector().unwrap().path_text(), "//ul");
    }

    #[test]
    fn test_close_control_stops_session() {
        let (mut app, _) = app();
        let close = app
            .inspector()
            .unwrap()
            .panel()
            .control_rect(crate::inspector::panel::PanelControl::Close)
            .origin();
        app.pointer_press(close, PointerButton::Primary);
        assert!(app.inspector().is_none());
        app.toggle_inspector();
        assert!(app.inspector().is_some());
    }

    #[test]
    fn test_analyze_failure_is_reported() {
        let (mut app, _) = app();
        app.move_cursor(3);
        app.select();
        app.analyze();
        assert_eq!(app.message().unwrap().level, MessageLevel::Error);
        assert!(app.inspector().unwrap().analysis().is_some());
    }

    #[test]
    fn test_write_fields() {
        let (mut app, _) = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.yaml");
        let path = path.to_str().unwrap().to_string();

        app.execute(Command::Write(path.clone()));
        assert_eq!(app.message().unwrap().level, MessageLevel::Error);

        app.move_cursor(3);
        app.select();
        app.execute(Command::Field("menu".into()));
        app.execute(Command::Write(path.clone()));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("menu: "));
    }
}
