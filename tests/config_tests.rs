use std::time::Duration;
use tempfile::TempDir;
use xpathquill::config::Config;
use xpathquill::inspector::geometry::Size;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.theme, "default-dark");
    assert_eq!(config.debounce(), Duration::from_millis(400));
    assert_eq!(config.analyze_timeout(), Duration::from_secs(10));
    assert_eq!(config.panel_size(), Size::new(64, 14));
    assert_eq!(config.min_panel_size(), Size::new(32, 8));
    assert_eq!(config.text_preview_limit, 300);
    assert_eq!(config.log_level, "info");
    assert!(config.enable_mouse);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        theme: "nord".to_string(),
        debounce_ms: 150,
        analyze_endpoint: "http://analyzer:9000".to_string(),
        enable_mouse: false,
        log_file: Some(dir.path().join("xpathquill.log")),
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = \"dracula\"\npanel_width = 80\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.theme, "dracula");
    assert_eq!(config.panel_width, 80);
    assert_eq!(config.panel_height, Config::default().panel_height);
    assert_eq!(config.debounce_ms, 400);
}

#[test]
fn test_invalid_or_missing_file_falls_back() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(Config::load_from(&missing), Config::default());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "theme = [not toml").unwrap();
    assert_eq!(Config::load_from(&broken), Config::default());
}
