//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types used to match and tokenize
//! source code for syntax highlighting.

use regex::Regex;

use super::style::Span;
use super::tokens::TokenType;

/// A single-line pattern rule
///
/// Styles the given capture group of every match. Rules are applied in
/// table order and a later rule overwrites an earlier one where they overlap.
pub struct Rule {
    /// Compiled regex pattern
    pattern: Regex,
    /// Capture group to style (0 = whole match)
    pub capture: usize,
    /// Token type to assign to matches
    pub token_type: TokenType,
}

impl Rule {
    /// Create a new rule
    pub fn new(pattern: &str, capture: usize, token_type: TokenType) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            capture,
            token_type,
        })
    }

    /// Byte ranges of the styled group for every match in text
    pub fn ranges<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, usize)> + 't {
        self.pattern
            .captures_iter(text)
            .filter_map(move |caps| caps.get(self.capture))
            .map(|m| (m.start(), m.end()))
    }
}

/// A delimiter that opens and closes a block which may span lines
///
/// Python's triple-quoted strings use the same delimiter on both ends.
pub struct MultilineRule {
    /// Pattern of the delimiter
    delimiter: Regex,
    /// Block state for lines ending inside this construct
    pub state: BlockState,
    /// Token type for this construct
    pub token_type: TokenType,
}

impl MultilineRule {
    /// Create a new multiline rule
    pub fn new(delimiter: &str, state_id: u8, token_type: TokenType) -> Result<Self, regex::Error> {
        Ok(Self {
            delimiter: Regex::new(delimiter)?,
            state: BlockState::inside(state_id),
            token_type,
        })
    }

    /// Find the next delimiter at or after `start`
    pub fn find(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start > text.len() {
            return None;
        }
        self.delimiter
            .find_at(text, start)
            .map(|m| (m.start(), m.end()))
    }
}

/// State carried from one block (line) to the next
///
/// 0 = neutral, otherwise the id of the multiline rule the line ends inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockState {
    pub multiline_id: u8,
}

impl BlockState {
    /// Neutral state
    pub const NORMAL: BlockState = BlockState { multiline_id: 0 };

    /// Create state for being inside a multiline construct
    pub fn inside(state_id: u8) -> Self {
        Self {
            multiline_id: state_id,
        }
    }
}

/// Result of highlighting a single block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans of styled text in this line
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: BlockState,
}
