//! Token types for syntax highlighting
//!
//! This module defines the semantic token types the Python rules
//! recognize and the color each is drawn with.

use super::style::{Color, Style};

/// Semantic token types for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Language keywords (if, def, return, etc.)
    Keyword,
    /// Operators (+, ==, <<, etc.)
    Operator,
    /// Braces, brackets and parentheses
    Brace,
    /// Name following `def` or `class`
    DefClass,
    /// Single-line string literals
    String,
    /// `#` comments
    Comment,
    /// Triple-quoted blocks, possibly spanning lines
    Docstring,
    /// The `self` reference
    SelfRef,
    /// Numeric literals
    Number,
}

/// Named colors matching the SVG color keywords
mod palette {
    use super::Color;

    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const DARK_GRAY: Color = Color::Rgb(169, 169, 169);
    pub const GOLD: Color = Color::Rgb(255, 215, 0);
    pub const GREEN: Color = Color::Rgb(0, 128, 0);
    pub const DIM_GRAY: Color = Color::Rgb(105, 105, 105);
    pub const GREEN_YELLOW: Color = Color::Rgb(173, 255, 47);
    pub const VIOLET: Color = Color::Rgb(238, 130, 238);
    pub const BROWN: Color = Color::Rgb(165, 42, 42);
}

impl TokenType {
    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Keyword => Style::fg(palette::ORANGE),
            TokenType::Operator => Style::fg(palette::DARK_GRAY),
            TokenType::Brace => Style::fg(palette::DARK_GRAY),
            TokenType::DefClass => Style::fg(palette::GOLD),
            TokenType::String => Style::fg(palette::GREEN).with_italic(),
            TokenType::Comment => Style::fg(palette::DIM_GRAY).with_italic(),
            TokenType::Docstring => Style::fg(palette::GREEN_YELLOW),
            TokenType::SelfRef => Style::fg(palette::VIOLET).with_italic(),
            TokenType::Number => Style::fg(palette::BROWN),
        }
    }
}
