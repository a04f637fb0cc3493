//! Color definitions for xpathquill themes.
//!
//! This module defines the [`ThemeColors`] struct which contains all color
//! values used in the xpathquill terminal UI. Colors are organized into three
//! categories: outline syntax, UI elements, and inspector overlays.

use ratatui::style::Color;

/// Defines all colors used in an xpathquill theme.
///
/// Colors are organized into three main categories:
/// - **Outline colors**: tag names, `#id`/`.class` decorations and text previews
/// - **UI colors**: background, foreground, cursor and status line
/// - **Inspector colors**: match highlights, hover, panel border and breadcrumbs
///
/// # Examples
///
/// ```
/// use xpathquill::theme::colors::ThemeColors;
///
/// let dark = ThemeColors::default_dark();
/// println!("Primary match: {:?}", dark.highlight_primary);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Outline colors
    /// Color for element tag names.
    pub tag: Color,
    /// Color for the `#id` and `.class` parts of a label.
    pub attribute: Color,
    /// Color for the element's own text preview.
    pub text: Color,

    // UI colors
    /// Main background color.
    pub background: Color,
    /// Main foreground/text color.
    pub foreground: Color,
    /// Color for the cursor position indicator.
    pub cursor: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,

    // Semantic colors
    /// Color for error messages.
    pub error: Color,
    /// Color for warning messages.
    pub warning: Color,
    /// Color for informational messages.
    pub info: Color,

    // Inspector colors
    /// Background of the first match.
    pub highlight_primary: Color,
    /// Background of every further match.
    pub highlight_secondary: Color,
    /// Background of the element under the pointer.
    pub hover: Color,
    /// Border of the floating panel.
    pub panel_border: Color,
    /// Clickable breadcrumb segments.
    pub crumb: Color,
}

impl ThemeColors {
    /// Returns the default dark color scheme.
    ///
    /// Uses ANSI colors so the terminal's own palette decides the exact shades.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpathquill::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_dark();
    /// assert_eq!(colors.background, Color::Reset);
    /// assert_eq!(colors.status_line_bg, Color::White);
    /// ```
    pub fn default_dark() -> Self {
        Self {
            tag: Color::LightBlue,
            attribute: Color::Yellow,
            text: Color::DarkGray,

            background: Color::Reset,
            foreground: Color::Gray,
            cursor: Color::LightBlue,
            status_line_bg: Color::White,
            status_line_fg: Color::Black,

            error: Color::Red,
            warning: Color::Yellow,
            info: Color::LightBlue,

            highlight_primary: Color::Red,
            highlight_secondary: Color::Blue,
            hover: Color::DarkGray,
            panel_border: Color::Cyan,
            crumb: Color::Green,
        }
    }

    /// Returns the default light color scheme.
    ///
    /// ```
    /// use xpathquill::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_light();
    /// assert_eq!(colors.background, Color::Rgb(250, 250, 250));
    /// ```
    pub fn default_light() -> Self {
        Self {
            tag: Color::Rgb(64, 120, 242),
            attribute: Color::Rgb(152, 104, 1),
            text: Color::Rgb(160, 161, 167),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            cursor: Color::Rgb(82, 139, 255),
            status_line_bg: Color::Rgb(229, 229, 230),
            status_line_fg: Color::Rgb(56, 58, 66),

            error: Color::Rgb(228, 86, 73),
            warning: Color::Rgb(193, 132, 1),
            info: Color::Rgb(1, 132, 188),

            highlight_primary: Color::Rgb(255, 205, 205),
            highlight_secondary: Color::Rgb(205, 225, 255),
            hover: Color::Rgb(229, 229, 230),
            panel_border: Color::Rgb(1, 132, 188),
            crumb: Color::Rgb(80, 161, 79),
        }
    }

    /// Returns the Gruvbox Dark color scheme.
    pub fn gruvbox_dark() -> Self {
        Self {
            tag: Color::Rgb(131, 165, 152),
            attribute: Color::Rgb(250, 189, 47),
            text: Color::Rgb(146, 131, 116),

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            cursor: Color::Rgb(254, 128, 25),
            status_line_bg: Color::Rgb(80, 73, 69),
            status_line_fg: Color::Rgb(235, 219, 178),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(250, 189, 47),
            info: Color::Rgb(131, 165, 152),

            highlight_primary: Color::Rgb(157, 0, 6),
            highlight_secondary: Color::Rgb(7, 102, 120),
            hover: Color::Rgb(60, 56, 54),
            panel_border: Color::Rgb(142, 192, 124),
            crumb: Color::Rgb(184, 187, 38),
        }
    }

    /// Returns the Nord color scheme.
    pub fn nord() -> Self {
        Self {
            tag: Color::Rgb(136, 192, 208),
            attribute: Color::Rgb(235, 203, 139),
            text: Color::Rgb(76, 86, 106),

            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            cursor: Color::Rgb(136, 192, 208),
            status_line_bg: Color::Rgb(59, 66, 82),
            status_line_fg: Color::Rgb(216, 222, 233),

            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
            info: Color::Rgb(129, 161, 193),

            highlight_primary: Color::Rgb(191, 97, 106),
            highlight_secondary: Color::Rgb(94, 129, 172),
            hover: Color::Rgb(67, 76, 94),
            panel_border: Color::Rgb(143, 188, 187),
            crumb: Color::Rgb(163, 190, 140),
        }
    }

    /// Returns the Dracula color scheme.
    pub fn dracula() -> Self {
        Self {
            tag: Color::Rgb(139, 233, 253),
            attribute: Color::Rgb(241, 250, 140),
            text: Color::Rgb(98, 114, 164),

            background: Color::Rgb(40, 42, 54),
            foreground: Color::Rgb(248, 248, 242),
            cursor: Color::Rgb(255, 121, 198),
            status_line_bg: Color::Rgb(68, 71, 90),
            status_line_fg: Color::Rgb(248, 248, 242),

            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(255, 184, 108),
            info: Color::Rgb(139, 233, 253),

            highlight_primary: Color::Rgb(255, 85, 85),
            highlight_secondary: Color::Rgb(98, 114, 164),
            hover: Color::Rgb(68, 71, 90),
            panel_border: Color::Rgb(189, 147, 249),
            crumb: Color::Rgb(80, 250, 123),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_highlights_are_distinct() {
        for colors in [
            ThemeColors::default_dark(),
            ThemeColors::default_light(),
            ThemeColors::gruvbox_dark(),
            ThemeColors::nord(),
            ThemeColors::dracula(),
        ] {
            assert_ne!(colors.highlight_primary, colors.highlight_secondary);
            assert_ne!(colors.highlight_secondary, colors.hover);
        }
    }
}
