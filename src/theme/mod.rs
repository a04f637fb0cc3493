//! Theme system for xpathquill.
//!
//! - Color definitions ([`colors`] module)
//! - Theme data structure ([`Theme`])
//! - Built-in theme access ([`get_builtin_theme`])
//!
//! # Built-in Themes
//!
//! - `"default-dark"`: ANSI colors that follow the terminal palette
//! - `"default-light"`: A light theme for well-lit environments
//! - `"gruvbox-dark"`: Retro groove color scheme with warm, earthy tones
//! - `"nord"`: Arctic, north-bluish color palette
//! - `"dracula"`: Dark theme with vibrant purples and pinks
//!
//! # Examples
//!
//! ```
//! use xpathquill::theme::get_builtin_theme;
//!
//! let theme = get_builtin_theme("default-dark").unwrap();
//! println!("Theme: {}", theme.name);
//! println!("Primary match: {:?}", theme.colors.highlight_primary);
//! ```

pub mod colors;

use colors::ThemeColors;

/// A color theme for the xpathquill terminal UI.
///
/// # Examples
///
/// ```
/// use xpathquill::theme::{Theme, get_builtin_theme};
///
/// let theme = get_builtin_theme("nord").unwrap();
/// assert_eq!(theme.name, "nord");
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    /// The name of the theme (e.g., "default-dark").
    pub name: String,
    /// The color definitions for this theme.
    pub colors: ThemeColors,
}

/// Returns a built-in theme by name, or `None` if the name is not recognized.
///
/// # Examples
///
/// ```
/// use xpathquill::theme::get_builtin_theme;
///
/// assert!(get_builtin_theme("default-dark").is_some());
/// assert!(get_builtin_theme("nonexistent").is_none());
/// ```
pub fn get_builtin_theme(name: &str) -> Option<Theme> {
    let colors = match name {
        "default-dark" => ThemeColors::default_dark(),
        "default-light" => ThemeColors::default_light(),
        "gruvbox-dark" => ThemeColors::gruvbox_dark(),
        "nord" => ThemeColors::nord(),
        "dracula" => ThemeColors::dracula(),
        _ => return None,
    };
    Some(Theme {
        name: name.to_string(),
        colors,
    })
}

/// Returns the names accepted by [`get_builtin_theme`], sorted.
///
/// ```
/// use xpathquill::theme::list_builtin_themes;
///
/// let themes = list_builtin_themes();
/// assert!(themes.contains(&"default-dark".to_string()));
/// ```
pub fn list_builtin_themes() -> Vec<String> {
    let mut themes = vec![
        "default-dark".to_string(),
        "default-light".to_string(),
        "dracula".to_string(),
        "gruvbox-dark".to_string(),
        "nord".to_string(),
    ];
    themes.sort();
    themes
}
