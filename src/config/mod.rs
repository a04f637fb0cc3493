//! Configuration system for xpathquill.
//!
//! This module provides the configuration structure for xpathquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use xpathquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.debounce_ms, 400);
//!
//! // Create custom configuration
//! let custom = Config {
//!     theme: "gruvbox".to_string(),
//!     debounce_ms: 250,
//!     ..Config::default()
//! };
//! assert_eq!(custom.debounce().as_millis(), 250);
//! ```

use crate::inspector::geometry::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the xpathquill application.
///
/// All fields have defaults, so a config file only needs the keys it changes.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `debounce_ms` - Quiet period before an edited path is re-evaluated (default: 400)
/// * `analyze_endpoint` - Base URL of the analyze service (default: "http://localhost:8789")
/// * `analyze_timeout_secs` - Request timeout for the analyze service (default: 10)
/// * `panel_width` / `panel_height` - Initial panel size in cells (default: 64 x 14)
/// * `min_panel_width` / `min_panel_height` - Smallest panel size (default: 32 x 8)
/// * `text_preview_limit` - Characters of element text shown in the panel (default: 300)
/// * `enable_mouse` - Capture mouse events (default: true)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "info")
/// * `log_file` - Where logs go; no file means no logging (default: none)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Quiet period before an edited path is re-evaluated, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Base URL of the analyze service
    #[serde(default = "default_analyze_endpoint")]
    pub analyze_endpoint: String,

    /// Request timeout for the analyze service, in seconds
    #[serde(default = "default_analyze_timeout_secs")]
    pub analyze_timeout_secs: u64,

    #[serde(default = "default_panel_width")]
    pub panel_width: u16,

    #[serde(default = "default_panel_height")]
    pub panel_height: u16,

    #[serde(default = "default_min_panel_width")]
    pub min_panel_width: u16,

    #[serde(default = "default_min_panel_height")]
    pub min_panel_height: u16,

    /// Characters of element text shown in the selection details
    #[serde(default = "default_text_preview_limit")]
    pub text_preview_limit: usize,

    /// Capture mouse events
    #[serde(default = "default_enable_mouse")]
    pub enable_mouse: bool,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Returns the default theme name.
fn default_theme() -> String {
    "default-dark".to_string()
}

/// Returns the default debounce period.
fn default_debounce_ms() -> u64 {
    400
}

/// Returns the default analyze service URL.
fn default_analyze_endpoint() -> String {
    "http://localhost:8789".to_string()
}

fn default_analyze_timeout_secs() -> u64 {
    10
}

fn default_panel_width() -> u16 {
    64
}

fn default_panel_height() -> u16 {
    14
}

fn default_min_panel_width() -> u16 {
    32
}

fn default_min_panel_height() -> u16 {
    8
}

/// Returns the default text preview cap.
fn default_text_preview_limit() -> usize {
    300
}

/// Returns the default for enabling mouse support.
fn default_enable_mouse() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Example
    ///
    /// ```
    /// use xpathquill::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.analyze_endpoint, "http://localhost:8789");
    /// assert!(config.enable_mouse);
    /// assert!(config.log_file.is_none());
    /// ```
    fn default() -> Self {
        Self {
            theme: default_theme(),
            debounce_ms: default_debounce_ms(),
            analyze_endpoint: default_analyze_endpoint(),
            analyze_timeout_secs: default_analyze_timeout_secs(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            min_panel_width: default_min_panel_width(),
            min_panel_height: default_min_panel_height(),
            text_preview_limit: default_text_preview_limit(),
            enable_mouse: default_enable_mouse(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/xpathquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("xpathquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// The debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn analyze_timeout(&self) -> Duration {
        Duration::from_secs(self.analyze_timeout_secs)
    }

    pub fn panel_size(&self) -> Size {
        Size::new(i32::from(self.panel_width), i32::from(self.panel_height))
    }

    pub fn min_panel_size(&self) -> Size {
        Size::new(i32::from(self.min_panel_width), i32::from(self.min_panel_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("debounce_ms = 150\ntheme = \"nord\"").unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.theme, "nord");
        assert_eq!(config.text_preview_limit, 300);
        assert_eq!(config.min_panel_size(), Size::new(32, 8));
    }

    #[test]
    fn test_log_file_omitted_when_unset() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!toml_string.contains("log_file"));
    }
}
