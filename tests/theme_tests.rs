use ratatui::style::Color;
use xpathquill::theme::{get_builtin_theme, list_builtin_themes};

#[test]
fn test_default_themes_exist() {
    assert!(get_builtin_theme("default-dark").is_some());
    assert!(get_builtin_theme("default-light").is_some());
}

#[test]
fn test_invalid_theme_returns_none() {
    assert!(get_builtin_theme("nonexistent").is_none());
}

#[test]
fn test_theme_name_is_preserved() {
    for name in list_builtin_themes() {
        assert_eq!(get_builtin_theme(&name).unwrap().name, name);
    }
}

#[test]
fn test_light_theme_has_light_background() {
    let light = get_builtin_theme("default-light").unwrap();
    assert_eq!(light.colors.background, Color::Rgb(250, 250, 250));
    let dark = get_builtin_theme("default-dark").unwrap();
    assert_eq!(dark.colors.background, Color::Reset);
}

#[test]
fn test_highlight_colors_stand_out() {
    for name in list_builtin_themes() {
        let colors = get_builtin_theme(&name).unwrap().colors;
        assert_ne!(colors.highlight_primary, colors.background, "{}", name);
        assert_ne!(colors.highlight_secondary, colors.background, "{}", name);
        assert_ne!(colors.highlight_primary, colors.highlight_secondary, "{}", name);
    }
}
