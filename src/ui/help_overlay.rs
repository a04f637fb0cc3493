//! Help overlay for displaying keybindings and commands.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Outline",
        &[
            ("j/k", "Move cursor down/up (hovers the element)"),
            ("g / G", "Jump to first/last element"),
            ("Ctrl-f / Ctrl-b", "Page down/up"),
            ("Enter / Space", "Generate a path for the element"),
            ("mouse click", "Same, for the element under the pointer"),
        ],
    ),
    (
        "Inspector",
        &[
            ("i", "Start or stop the inspector"),
            ("p", "Pause or resume inspection"),
            ("e or /", "Edit the path (applied after a short pause)"),
            ("1-9", "Narrow the path through a breadcrumb"),
            ("Alt-1..9", "Narrow to a // path from a breadcrumb"),
            ("y / Y", "Copy the path / the recorded fields"),
            ("a", "Send the path to the analyze service"),
            ("f", "Check every recorded field"),
            ("drag title", "Move the panel"),
            ("drag ◢", "Resize the panel"),
        ],
    ),
    (
        "Commands",
        &[
            (":field NAME", "Record the path under NAME"),
            (":unfield NAME", "Forget a recorded field"),
            (":fields", "Check every recorded field"),
            (":w PATH", "Write the recorded fields as YAML"),
            (":crumb N", "Narrow through breadcrumb N"),
            (":descend N", "Narrow to a // path from breadcrumb N"),
            (":unordinal N", "Drop the position of breadcrumb N"),
            (":url URL", "Page URL sent with analyze requests"),
            (":theme [NAME]", "List or switch themes"),
            (":set [no]mouse", "Enable or disable mouse input"),
            (":q", "Quit"),
        ],
    ),
];

/// Renders a centered help overlay showing keybindings and commands.
pub fn render_help_overlay(f: &mut Frame, colors: &ThemeColors) {
    let area = centered_rect(80, 85, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" xpathquill Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.info))
        .style(Style::default().bg(colors.background));

    let mut help_text = Vec::new();
    for (title, bindings) in SECTIONS {
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            *title,
            Style::default().fg(colors.tag).add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<16}", keys), Style::default().fg(colors.attribute)),
                Span::raw(*description),
            ]));
        }
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "? or Esc to close",
        Style::default().fg(colors.info).add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
