//! Style types for text rendering
//!
//! This module provides the foundation for styled text rendering,
//! used for syntax highlighting and the editor chrome.

use super::tokens::TokenType;

/// Terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the terminal uses
    #[default]
    Default,
    Black,
    /// 24-bit color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse `#rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (status bar)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A highlighted span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// What the text is
    pub token_type: TokenType,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, token_type: TokenType) -> Self {
        Self {
            start,
            end,
            token_type,
        }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Style to draw the span with
    pub fn style(&self) -> Style {
        self.token_type.default_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert_eq!(style.bg, Color::Default);
        assert_eq!(style.fg, Color::Default);
        assert!(!style.italic);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Black)
            .with_bg(Color::Rgb(1, 2, 3))
            .with_italic();
        assert_eq!(style.fg, Color::Black);
        assert_eq!(style.bg, Color::Rgb(1, 2, 3));
        assert!(style.italic);
        assert_ne!(style, Style::default());
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(
            Color::from_hex("#102020"),
            Some(Color::Rgb(0x10, 0x20, 0x20))
        );
        assert_eq!(Color::from_hex("#FFa500"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(Color::from_hex("102020"), None);
        assert_eq!(Color::from_hex("#1020"), None);
        assert_eq!(Color::from_hex("#zz2020"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, TokenType::Keyword);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
    }
}
