//! Configuration file support
//!
//! Loads settings from ~/.pyedit.toml (or %USERPROFILE%\.pyedit.toml on Windows)
//!
//! Example:
//! ```text
//! # pyedit configuration
//! tab-width = 4
//! line-numbers = true
//! highlight-current-line = true
//! syntax-highlighting = true
//! current-line-color = "#102020"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::syntax::Color;

/// Configuration settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Width of a tab stop in columns
    pub tab_width: usize,
    /// Whether to show the line number gutter
    pub line_numbers: bool,
    /// Whether to paint the cursor line background
    pub highlight_current_line: bool,
    /// Whether Python syntax coloring is on at startup
    pub syntax_highlighting: bool,
    /// Background of the cursor line, as `#rrggbb`
    pub current_line_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_numbers: true,
            highlight_current_line: true,
            syntax_highlighting: true,
            current_line_color: "#102020".to_string(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pyedit.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pyedit.toml"))
        }
    }

    /// Load configuration from an explicit path or the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.tab_width = config.tab_width.clamp(1, 16);
        Ok(config)
    }

    /// Cursor line background, falling back to the default on a bad value
    pub fn current_line_color(&self) -> Color {
        Color::from_hex(&self.current_line_color).unwrap_or_else(|| {
            tracing::warn!(value = %self.current_line_color, "bad current-line-color");
            Color::Rgb(0x10, 0x20, 0x20)
        })
    }
}
