//! Status line widget for displaying host and inspector state.
//!
//! The status line shows:
//! - Current mode (NORMAL, EDIT, COMMAND)
//! - Filename (or "[sample]" for the built-in page)
//! - Inspector mode, or "OFF" when no session is running
//! - Match and recorded field counts
//! - Cursor position (row/total)
//!
//! Example status line: `NORMAL | page.html | INSPECT | 3 matches | 2 fields        5/20`

use crate::app::state::AppState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the status line.
///
/// # Example
///
/// ```no_run
/// use ratatui::Frame;
/// use ratatui::layout::Rect;
/// use xpathquill::app::AppState;
/// use xpathquill::theme;
///
/// # fn example(f: &mut Frame, area: Rect, state: &AppState) {
/// let theme = theme::get_builtin_theme("default-dark").unwrap();
/// xpathquill::ui::status_line::render_status_line(f, area, state, &theme.colors);
/// # }
/// ```
pub fn render_status_line(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let filename = state.filename().unwrap_or("[sample]");
    let mode_and_file = format!("{} | {}", state.mode(), filename);

    let (inspector, counts) = match state.inspector() {
        Some(session) => {
            let matches = match session.matches().len() {
                1 => "1 match".to_string(),
                n => format!("{} matches", n),
            };
            let fields = match session.fields().len() {
                0 => String::new(),
                1 => " | 1 field".to_string(),
                n => format!(" | {} fields", n),
            };
            (format!(" | {}", session.mode()), format!(" | {}{}", matches, fields))
        }
        None => (" | OFF".to_string(), String::new()),
    };

    let total = state.outline().len();
    let row = if total == 0 { 0 } else { state.cursor() + 1 };
    let position = format!("{}/{}", row, total);

    let total_width = area.width as usize;
    let left_len = mode_and_file.chars().count()
        + inspector.chars().count()
        + counts.chars().count();
    let position_len = position.len();

    let padding = if left_len + position_len + 1 < total_width {
        total_width - left_len - position_len
    } else {
        1
    };

    let default_style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);
    let inspector_style = Style::default().fg(colors.info).bg(colors.status_line_bg);

    let line = Line::from(vec![
        Span::styled(mode_and_file, default_style),
        Span::styled(inspector, inspector_style),
        Span::styled(counts, default_style),
        Span::styled(" ".repeat(padding), default_style),
        Span::styled(position, default_style),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{AnalyzeError, AnalyzeRequest, Analyzer};
    use crate::config::Config;
    use crate::document::parser::parse_html;
    use crate::export::MemoryClipboard;
    use crate::theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    struct Offline;

    impl Analyzer for Offline {
        fn analyze(&self, _: &AnalyzeRequest) -> Result<serde_json::Value, AnalyzeError> {
            Err(AnalyzeError::Transport("offline".into()))
        }
    }

    fn state() -> AppState {
        let tree = parse_html("<p>one</p><p>two</p>").unwrap();
        AppState::new(
            tree,
            Config::default(),
            Box::new(Offline),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn status_text(state: &AppState) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = theme::get_builtin_theme("default-dark").unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_status_line(f, area, state, &theme.colors);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .take(80)
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_status_line_sample_page() {
        let text = status_text(&state());
        assert!(text.starts_with("NORMAL | [sample] | INSPECT | 0 matches"), "{}", text);
        assert!(text.trim_end().ends_with("1/5"), "{}", text);
    }

    #[test]
    fn test_status_line_with_filename() {
        let mut state = state();
        state.set_filename("page.html".to_string());
        let text = status_text(&state);
        assert!(text.contains("page.html"), "{}", text);
    }

    #[test]
    fn test_status_line_inspector_off() {
        let mut state = state();
        state.toggle_inspector();
        let text = status_text(&state);
        assert!(text.contains("| OFF"), "{}", text);
        assert!(!text.contains("matches"), "{}", text);
    }
}
