//! The floating inspector panel.
//!
//! Rows inside the border, top to bottom: the path, the breadcrumbs, the
//! match summary, then the selection details and the analysis or field
//! report, as far as the panel's height allows.
//!
//! The path and breadcrumb rows never wrap. A long path is shown by its
//! tail, and the breadcrumb row scrolls so its last crumb stays visible;
//! [`visible_crumb_at`] applies the same scroll to mouse hits.

use crate::export::{FieldOutcome, FieldReport};
use crate::inspector::geometry::{Point, Rect as CellRect};
use crate::inspector::panel::PanelControl;
use crate::inspector::state::{AnalysisView, InspectorState};
use crate::theme::colors::ThemeColors;
use crate::xpath::breadcrumb::Breadcrumbs;
use crate::xpath::generator::Strategy;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Row of the path, relative to the panel's origin.
pub const PATH_ROW: i32 = 1;

/// Row of the breadcrumbs, relative to the panel's origin.
pub const BREADCRUMB_ROW: i32 = 2;

const PATH_LABEL: &str = "Path: ";

/// What a breadcrumb piece does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrumbTarget {
    Narrow(usize),
    RemoveOrdinal(usize),
}

/// One run of breadcrumb text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbPiece {
    pub text: String,
    pub target: Option<CrumbTarget>,
}

/// Lays the breadcrumbs out left to right: `//div[@x]/span[2]×/@href`.
pub fn crumb_pieces(crumbs: &Breadcrumbs) -> Vec<CrumbPiece> {
    let mut pieces = vec![CrumbPiece {
        text: crumbs.origin.marker().to_string(),
        target: None,
    }];
    for (position, affordance) in crumbs.affordances.iter().enumerate() {
        if position > 0 {
            pieces.push(CrumbPiece {
                text: "/".to_string(),
                target: None,
            });
        }
        let mut text = affordance.label.clone();
        for predicate in &affordance.predicates {
            text.push_str(predicate);
        }
        pieces.push(CrumbPiece {
            text,
            target: affordance
                .clickable
                .then_some(CrumbTarget::Narrow(affordance.index)),
        });
        if let Some(ordinal) = affordance.ordinal {
            pieces.push(CrumbPiece {
                text: format!("[{}]", ordinal),
                target: None,
            });
            pieces.push(CrumbPiece {
                text: "×".to_string(),
                target: Some(CrumbTarget::RemoveOrdinal(affordance.index)),
            });
        }
    }
    pieces
}

/// Finds the breadcrumb target at a column of the breadcrumb row.
///
/// ```
/// use xpathquill::ui::panel::{crumb_at, CrumbTarget};
/// use xpathquill::xpath::breadcrumb;
///
/// let crumbs = breadcrumb::build("/html/body/div[3]").unwrap();
/// // "/html/body/div[3]×"
/// assert_eq!(crumb_at(&crumbs, 1), Some(CrumbTarget::Narrow(0)));
/// assert_eq!(crumb_at(&crumbs, 11), Some(CrumbTarget::Narrow(2)));
/// assert_eq!(crumb_at(&crumbs, 17), Some(CrumbTarget::RemoveOrdinal(2)));
/// assert_eq!(crumb_at(&crumbs, 0), None);
/// ```
pub fn crumb_at(crumbs: &Breadcrumbs, column: i32) -> Option<CrumbTarget> {
    if column < 0 {
        return None;
    }
    let mut start = 0;
    for piece in crumb_pieces(crumbs) {
        let width = piece.text.chars().count() as i32;
        if column < start + width {
            return piece.target;
        }
        start += width;
    }
    None
}

/// Columns the breadcrumb row is scrolled left by in a row `inner_width` wide.
pub fn crumb_scroll(crumbs: &Breadcrumbs, inner_width: i32) -> i32 {
    let total: i32 = crumb_pieces(crumbs)
        .iter()
        .map(|piece| piece.text.chars().count() as i32)
        .sum();
    (total - inner_width).max(0)
}

/// Finds the breadcrumb target at a column of the breadcrumb row as drawn,
/// counting from the panel's inner left edge.
///
/// ```
/// use xpathquill::ui::panel::{visible_crumb_at, CrumbTarget};
/// use xpathquill::xpath::breadcrumb;
///
/// let crumbs = breadcrumb::build("/html/body/div[3]").unwrap();
/// // 18 columns in a 10 column row: "dy/div[3]×" is visible
/// assert_eq!(visible_crumb_at(&crumbs, 3, 10), Some(CrumbTarget::Narrow(2)));
/// assert_eq!(visible_crumb_at(&crumbs, 9, 10), Some(CrumbTarget::RemoveOrdinal(2)));
/// ```
pub fn visible_crumb_at(crumbs: &Breadcrumbs, column: i32, inner_width: i32) -> Option<CrumbTarget> {
    if column < 0 || column >= inner_width {
        return None;
    }
    crumb_at(crumbs, column + crumb_scroll(crumbs, inner_width))
}

/// Converts a cell rectangle to a terminal area, clipped to `bounds`.
fn clip(rect: CellRect, bounds: Rect) -> Option<Rect> {
    let left = rect.x.max(bounds.x as i32);
    let top = rect.y.max(bounds.y as i32);
    let right = rect.right().min(bounds.right() as i32);
    let bottom = rect.bottom().min(bounds.bottom() as i32);
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Identifier => "id",
        Strategy::Canonical => "canonical",
        Strategy::ClassCandidate => "class",
        Strategy::AncestorChain => "ancestor chain",
    }
}

/// Renders the panel of an active inspector session.
pub fn render_panel(
    f: &mut Frame,
    session: &InspectorState,
    report: &[FieldReport],
    colors: &ThemeColors,
) {
    let panel = session.panel();
    let Some(area) = clip(panel.rect(), f.area()) else {
        return;
    };

    let label = Style::default().fg(colors.foreground).add_modifier(Modifier::DIM);
    let value = Style::default().fg(colors.foreground);

    // the path and breadcrumb rows are drawn over these after the body
    let mut lines = vec![Line::from(""), Line::from("")];
    lines.push(summary_line(session, label, value, colors));

    if let Some(selection) = session.selection() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            selection.summary.clone(),
            Style::default().fg(colors.tag).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("Text: ", label),
            Span::styled(selection.display_text.clone(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Attributes: ", label),
            Span::styled(selection.attributes.join(" "), Style::default().fg(colors.attribute)),
        ]));
    }

    match session.analysis() {
        Some(AnalysisView::Result(text)) => {
            lines.push(Line::from(Span::styled("Analysis:", label)));
            lines.extend(text.lines().map(|l| Line::from(Span::styled(l.to_string(), value))));
        }
        Some(AnalysisView::Failed(error)) => {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(colors.error),
            )));
        }
        None => {}
    }

    if !report.is_empty() {
        lines.push(Line::from(Span::styled("Fields:", label)));
        for entry in report {
            let style = match entry.outcome {
                FieldOutcome::Matched { .. } => value,
                FieldOutcome::NoMatch => Style::default().fg(colors.warning),
                FieldOutcome::Error(_) => Style::default().fg(colors.error),
            };
            lines.push(Line::from(Span::styled(entry.to_string(), style)));
        }
    }

    let title = format!(" xpathquill · {} ", session.mode());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(colors.panel_border));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(colors.background)),
        area,
    );

    let bounds = f.area();
    let rect = panel.rect();
    let inner_width = rect.width - 2;
    put_row(f, bounds, rect, PATH_ROW, &path_runs(session, inner_width, label, value), 0);
    match session.breadcrumbs() {
        Some(crumbs) => put_row(
            f,
            bounds,
            rect,
            BREADCRUMB_ROW,
            &crumb_runs(crumbs, colors),
            crumb_scroll(crumbs, inner_width),
        ),
        None => put_row(
            f,
            bounds,
            rect,
            BREADCRUMB_ROW,
            &[("(no breadcrumbs)".to_string(), label)],
            0,
        ),
    }

    let control_style = Style::default().fg(colors.panel_border).add_modifier(Modifier::BOLD);
    for (control, text) in [(PanelControl::Toggle, "[-]"), (PanelControl::Close, "[x]")] {
        put(f, bounds, panel.control_rect(control).origin(), text, control_style);
    }
    put(f, bounds, panel.resize_handle().origin(), "◢", control_style);
}

fn put(f: &mut Frame, bounds: Rect, at: Point, text: &str, style: Style) {
    let width = text.chars().count() as i32;
    if clip(CellRect::new(at.x, at.y, width, 1), bounds).map(|r| r.width as i32) == Some(width) {
        f.buffer_mut().set_string(at.x as u16, at.y as u16, text, style);
    }
}

/// Draws styled runs on one inner row of the panel, cut to the border.
fn put_row(
    f: &mut Frame,
    bounds: Rect,
    panel: CellRect,
    row: i32,
    runs: &[(String, Style)],
    scroll: i32,
) {
    let y = panel.y + row;
    let left = (panel.x + 1).max(bounds.x as i32);
    let right = (panel.right() - 1).min(bounds.right() as i32);
    if y >= panel.bottom() - 1 || y < bounds.y as i32 || y >= bounds.bottom() as i32 {
        return;
    }

    let buffer = f.buffer_mut();
    let mut x = panel.x + 1 - scroll;
    for (text, style) in runs {
        for c in text.chars() {
            if x >= left && x < right {
                buffer[(x as u16, y as u16)].set_char(c).set_style(*style);
            }
            x += 1;
        }
    }
}

fn path_runs(
    session: &InspectorState,
    inner_width: i32,
    label: Style,
    value: Style,
) -> Vec<(String, Style)> {
    let path = session.path_text();
    if path.is_empty() {
        return vec![
            (PATH_LABEL.to_string(), label),
            ("(click an element)".to_string(), value),
        ];
    }

    let room = (inner_width - PATH_LABEL.len() as i32).max(0) as usize;
    let length = path.chars().count();
    let shown = if length <= room {
        path.to_string()
    } else {
        let tail: String = path.chars().skip(length + 1 - room.max(1)).collect();
        format!("…{}", tail)
    };
    vec![(PATH_LABEL.to_string(), label), (shown, value)]
}

fn crumb_runs(crumbs: &Breadcrumbs, colors: &ThemeColors) -> Vec<(String, Style)> {
    crumb_pieces(crumbs)
        .into_iter()
        .map(|piece| {
            let style = match piece.target {
                Some(CrumbTarget::Narrow(_)) => Style::default()
                    .fg(colors.crumb)
                    .add_modifier(Modifier::UNDERLINED),
                Some(CrumbTarget::RemoveOrdinal(_)) => Style::default().fg(colors.error),
                None => Style::default().fg(colors.foreground),
            };
            (piece.text, style)
        })
        .collect()
}

fn summary_line<'a>(
    session: &'a InspectorState,
    label: Style,
    value: Style,
    colors: &ThemeColors,
) -> Line<'a> {
    let count = match session.matches().len() {
        0 => "No match".to_string(),
        1 => "1 match".to_string(),
        n => format!("{} matches", n),
    };
    let mut spans = vec![Span::styled(count, value)];
    if let Some(strategy) = session.strategy() {
        spans.push(Span::styled(format!(" · {}", strategy_name(strategy)), label));
    }
    if session.is_edit_pending() {
        spans.push(Span::styled(" (pending)", Style::default().fg(colors.warning)));
    }
    Line::from(spans)
}
