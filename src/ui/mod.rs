pub mod edit_prompt;
pub mod help_overlay;
pub mod message_area;
/// UI module for the xpathquill terminal interface.
///
/// This module provides the main UI structure for rendering the terminal interface,
/// including layout management and widget composition.
pub mod panel;
pub mod status_line;
pub mod tree_view;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::app::mode::AppMode;
use crate::app::state::AppState;
use crate::inspector::geometry::{Rect as CellRect, Size};
use crate::theme::Theme;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three main areas and one floating panel:
/// - Main view area (top): the document outline with inspector highlights
/// - Status line (middle): mode, file, inspector state and cursor position
/// - Message area (bottom): messages, the command line or the path prompt
/// - Inspector panel: drawn over the outline while a session is running
///
/// # Example
///
/// ```no_run
/// use xpathquill::ui::UI;
/// use xpathquill::theme::get_builtin_theme;
/// use ratatui::backend::TermionBackend;
/// use ratatui::Terminal;
/// use std::io;
/// use termion::raw::IntoRawMode;
///
/// let theme = get_builtin_theme("default-dark").unwrap();
/// let ui = UI::new(theme);
/// let backend = TermionBackend::new(io::stdout().into_raw_mode().unwrap());
/// let mut terminal = Terminal::new(backend).unwrap();
/// // ui.render(&mut terminal, &mut state).unwrap();
/// ```
pub struct UI {
    theme: Theme,
}

impl UI {
    /// Creates a new UI instance with the specified theme.
    ///
    /// ```
    /// use xpathquill::ui::UI;
    /// use xpathquill::theme::get_builtin_theme;
    ///
    /// let theme = get_builtin_theme("nord").unwrap();
    /// let ui = UI::new(theme);
    /// assert_eq!(ui.theme_name(), "nord");
    /// ```
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Changes the current theme.
    ///
    /// Returns true if the theme was successfully changed, false if the theme name is invalid.
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        use crate::theme::get_builtin_theme;

        if let Some(new_theme) = get_builtin_theme(theme_name) {
            self.theme = new_theme;
            true
        } else {
            false
        }
    }

    /// Renders the UI to the terminal.
    ///
    /// The outline's area is handed to the state before drawing so pointer
    /// hit tests and inspector highlights use the geometry just drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(&self, terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
        let colors = &self.theme.colors;
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Main view area
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            let main = chunks[0];
            let screen = f.area();
            state.layout(
                CellRect::new(
                    i32::from(main.x),
                    i32::from(main.y),
                    i32::from(main.width),
                    i32::from(main.height),
                ),
                Size::new(i32::from(screen.width), i32::from(screen.height)),
            );

            tree_view::render_tree_view(
                f,
                main,
                state.outline(),
                state.cursor(),
                state.scroll_offset(),
                state.inspector(),
                colors,
            );

            status_line::render_status_line(f, chunks[1], state, colors);

            if state.mode() == AppMode::EditPath {
                edit_prompt::render_edit_prompt(
                    f,
                    chunks[2],
                    state.edit_buffer(),
                    state.edit_cursor(),
                    colors,
                    "Path: ",
                );
            } else {
                message_area::render_message_area(f, chunks[2], state, colors);
            }

            if let Some(session) = state.inspector() {
                panel::render_panel(f, session, state.report(), colors);
            }

            // Help overlay (rendered on top if visible)
            if state.show_help() {
                help_overlay::render_help_overlay(f, colors);
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{AnalyzeError, AnalyzeRequest, Analyzer};
    use crate::config::Config;
    use crate::document::parser::parse_html;
    use crate::app::state::PointerButton;
    use crate::export::MemoryClipboard;
    use crate::inspector::geometry::Point;
    use crate::theme::get_builtin_theme;
    use crate::ui::panel::{BREADCRUMB_ROW, PATH_ROW};
    use ratatui::backend::TestBackend;

    struct Offline;

    impl Analyzer for Offline {
        fn analyze(&self, _: &AnalyzeRequest) -> std::result::Result<serde_json::Value, AnalyzeError> {
            Err(AnalyzeError::Transport("offline".into()))
        }
    }

    fn state() -> AppState {
        state_of(r#"<div id="main"><a href="/x">link</a></div>"#)
    }

    fn state_of(html: &str) -> AppState {
        let tree = parse_html(html).unwrap();
        AppState::new(
            tree,
            Config::default(),
            Box::new(Offline),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area().width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_set_theme() {
        let mut ui = UI::new(get_builtin_theme("default-dark").unwrap());
        assert!(ui.set_theme("dracula"));
        assert_eq!(ui.theme_name(), "dracula");
        assert!(!ui.set_theme("no-such-theme"));
        assert_eq!(ui.theme_name(), "dracula");
    }

    #[test]
    fn test_render_places_panel() {
        let ui = UI::new(get_builtin_theme("default-dark").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = state();

        ui.render(&mut terminal, &mut state).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("xpathquill · INSPECT"), "{}", text);
        assert!(text.contains("NORMAL | [sample]"), "{}", text);

        let rect = state.inspector().unwrap().panel().rect();
        assert_eq!((rect.x, rect.y), (80 - rect.width - 1, 24 - rect.height - 2));
    }

    #[test]
    fn test_render_selected_path() {
        let ui = UI::new(get_builtin_theme("default-dark").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = state();

        ui.render(&mut terminal, &mut state).unwrap();
        state.move_cursor(3);
        state.select();
        ui.render(&mut terminal, &mut state).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(r#"Path: //*[@id="main"]"#), "{}", text);
        assert!(text.contains("1 match"), "{}", text);
    }

    fn screen_row(terminal: &Terminal<TestBackend>, y: i32) -> String {
        screen_text(terminal).lines().nth(y as usize).unwrap().to_string()
    }

    #[test]
    fn test_long_path_keeps_breadcrumb_row() {
        let ui = UI::new(get_builtin_theme("default-dark").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = state_of(
            "<div></div><div><section></section><section><article></article>\
             <article><ul><li></li><li><span></span><span><b>x</b><b>y</b>\
             </span></li></ul></article></section></div>",
        );

        ui.render(&mut terminal, &mut state).unwrap();
        state.jump_to_bottom();
        state.select();
        ui.render(&mut terminal, &mut state).unwrap();
        assert_eq!(
            state.inspector().unwrap().path_text(),
            "/html/body/div[2]/section[2]/article[2]/ul/li[2]/span[2]/b[2]"
        );

        let rect = state.inspector().unwrap().panel().rect();
        let path_row = screen_row(&terminal, rect.y + PATH_ROW);
        assert!(path_row.contains("Path: …"), "{}", path_row);
        assert!(path_row.contains("span[2]/b[2]"), "{}", path_row);
        // 67 columns of crumbs in a 62 column row: the first five scroll off
        let crumb_row = screen_row(&terminal, rect.y + BREADCRUMB_ROW);
        assert!(crumb_row.contains("│/body/div[2]×"), "{}", crumb_row);
        assert!(crumb_row.contains("/b[2]×│"), "{}", crumb_row);

        let left = rect.x + 1;
        state.pointer_press(Point::new(left, rect.y + PATH_ROW), PointerButton::Primary);
        assert!(state.inspector().unwrap().path_text().ends_with("/b[2]"));

        // the last ordinal's remove marker, at the row's right edge
        state.pointer_press(
            Point::new(left + rect.width - 3, rect.y + BREADCRUMB_ROW),
            PointerButton::Primary,
        );
        assert!(
            state.inspector().unwrap().path_text().ends_with("/span[2]/b"),
            "{}",
            state.inspector().unwrap().path_text()
        );

        // one column scrolled off now, so the second column is inside "html"
        state.pointer_press(Point::new(left + 1, rect.y + BREADCRUMB_ROW), PointerButton::Primary);
        assert_eq!(state.inspector().unwrap().path_text(), "/html");
    }

    #[test]
    fn test_render_edit_prompt_and_help() {
        let ui = UI::new(get_builtin_theme("default-light").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = state();

        state.start_edit();
        ui.render(&mut terminal, &mut state).unwrap();
        assert!(screen_text(&terminal).contains("Path: "));

        state.exit_mode();
        state.toggle_help();
        ui.render(&mut terminal, &mut state).unwrap();
        assert!(screen_text(&terminal).contains("xpathquill Help"));
    }
}
