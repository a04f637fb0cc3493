use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the path prompt with a block cursor.
///
/// `cursor_pos` counts characters, not bytes.
pub fn render_edit_prompt(
    f: &mut Frame,
    area: Rect,
    buffer: &str,
    cursor_pos: usize,
    colors: &ThemeColors,
    prompt: &str,
) {
    let chars: Vec<char> = buffer.chars().collect();
    let cursor_pos = cursor_pos.min(chars.len());

    let before: String = chars[..cursor_pos].iter().collect();
    let after: String = chars.iter().skip(cursor_pos + 1).collect();
    let char_at_cursor = chars.get(cursor_pos).copied().unwrap_or(' ');

    let text_style = Style::default()
        .fg(colors.foreground)
        .bg(colors.background)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(prompt, text_style),
        Span::styled(before, text_style),
        Span::styled(
            char_at_cursor.to_string(),
            Style::default()
                .fg(colors.background)
                .bg(colors.cursor)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !after.is_empty() {
        spans.push(Span::styled(after, text_style));
    }

    let line = Line::from(spans);
    let prompt = Paragraph::new(line).style(Style::default().bg(colors.background));

    f.render_widget(prompt, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_prompt_with_multibyte_text() {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        let theme = theme::get_builtin_theme("default-dark").unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_edit_prompt(f, area, "//é", 3, &theme.colors, "Path: ");
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.starts_with("Path: //é"), "{}", text);
        assert_eq!(buffer[(9, 0)].bg, theme.colors.cursor);
    }
}
