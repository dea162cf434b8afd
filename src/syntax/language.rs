//! Language definitions for syntax highlighting
//!
//! A [`LanguageDefinition`] is an ordered rule table plus the multiline
//! delimiters whose state is carried from block to block.

use super::rules::{BlockState, HighlightResult, MultilineRule, Rule};
use super::style::Span;
use super::tokens::TokenType;

/// A complete language definition for syntax highlighting
pub struct LanguageDefinition {
    /// Language name (e.g., "Python")
    pub name: String,
    /// File extensions (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Single-line rules, in application order
    rules: Vec<Rule>,
    /// Multiline delimiters, in the order they are tried
    multiline_rules: Vec<MultilineRule>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            rules: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Append a rule; it wins over every rule added before it
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Add a multiline rule
    pub fn add_multiline(&mut self, rule: MultilineRule) {
        self.multiline_rules.push(rule);
    }

    /// Number of single-line rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Highlight a single block of text
    ///
    /// Takes the line text and the state the previous block ended in.
    /// Returns spans and the state for the next block.
    pub fn highlight_block(&self, text: &str, prev_state: BlockState) -> HighlightResult {
        let mut formats: Vec<Option<TokenType>> = vec![None; text.len()];

        for rule in &self.rules {
            for (start, end) in rule.ranges(text) {
                formats[start..end].fill(Some(rule.token_type));
            }
        }

        let mut state = BlockState::NORMAL;
        for rule in &self.multiline_rules {
            if match_multiline(text, prev_state, rule, &mut formats, &mut state) {
                break;
            }
        }

        HighlightResult {
            spans: collect_spans(&formats),
            end_state: state,
        }
    }
}

/// Style one multiline construct over a block
///
/// Returns true if the block ends inside the construct.
fn match_multiline(
    text: &str,
    prev_state: BlockState,
    rule: &MultilineRule,
    formats: &mut [Option<TokenType>],
    state: &mut BlockState,
) -> bool {
    // Continuing from the previous block: styled from column 0, no opener
    let mut next = if prev_state == rule.state {
        Some((0, 0))
    } else {
        rule.find(text, 0)
    };

    while let Some((start, open_end)) = next {
        let end = match rule.find(text, open_end) {
            Some((_, close_end)) => {
                *state = BlockState::NORMAL;
                close_end
            }
            None => {
                *state = rule.state;
                text.len()
            }
        };
        formats[start..end].fill(Some(rule.token_type));
        next = rule.find(text, end);
    }

    *state == rule.state
}

/// Collapse per-byte formats into runs
fn collect_spans(formats: &[Option<TokenType>]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < formats.len() {
        let run = formats[pos..]
            .iter()
            .take_while(|f| **f == formats[pos])
            .count();
        if let Some(token_type) = formats[pos] {
            spans.push(Span::new(pos, pos + run, token_type));
        }
        pos += run;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_language() -> LanguageDefinition {
        let mut lang = LanguageDefinition::new("Test");
        lang.add_extension("test");
        lang.add_rule(Rule::new(r"\bdef\b", 0, TokenType::Keyword).unwrap());
        lang.add_rule(Rule::new(r"\d+", 0, TokenType::Number).unwrap());
        lang.add_rule(Rule::new(r"#.*", 0, TokenType::Comment).unwrap());
        lang.add_multiline(MultilineRule::new("'''", 1, TokenType::Docstring).unwrap());
        lang
    }

    #[test]
    fn test_simple_highlighting() {
        let lang = create_test_language();
        let result = lang.highlight_block("def x = 42", BlockState::NORMAL);

        assert_eq!(result.end_state, BlockState::NORMAL);
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 3, TokenType::Keyword),
                Span::new(8, 10, TokenType::Number),
            ]
        );
    }

    #[test]
    fn test_later_rule_overrides() {
        let lang = create_test_language();
        let result = lang.highlight_block("x # def 1", BlockState::NORMAL);
        assert_eq!(result.spans, vec![Span::new(2, 9, TokenType::Comment)]);
    }

    #[test]
    fn test_multiline_start() {
        let lang = create_test_language();
        let result = lang.highlight_block("x = '''doc 1", BlockState::NORMAL);

        assert_eq!(result.end_state, BlockState::inside(1));
        assert_eq!(result.spans, vec![Span::new(4, 12, TokenType::Docstring)]);
    }

    #[test]
    fn test_multiline_continue() {
        let lang = create_test_language();
        let result = lang.highlight_block("still def 1", BlockState::inside(1));

        assert_eq!(result.end_state, BlockState::inside(1));
        assert_eq!(result.spans, vec![Span::new(0, 11, TokenType::Docstring)]);
    }

    #[test]
    fn test_multiline_end() {
        let lang = create_test_language();
        let result = lang.highlight_block("end''' def", BlockState::inside(1));

        assert_eq!(result.end_state, BlockState::NORMAL);
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 6, TokenType::Docstring),
                Span::new(7, 10, TokenType::Keyword),
            ]
        );
    }

    #[test]
    fn test_close_then_reopen() {
        let lang = create_test_language();
        let result = lang.highlight_block("a''' b '''c", BlockState::inside(1));
        assert_eq!(result.end_state, BlockState::inside(1));
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 4, TokenType::Docstring),
                Span::new(7, 11, TokenType::Docstring),
            ]
        );
    }

    #[test]
    fn test_one_line_docstring() {
        let lang = create_test_language();
        let result = lang.highlight_block("'''a''' 7", BlockState::NORMAL);
        assert_eq!(result.end_state, BlockState::NORMAL);
        assert_eq!(
            result.spans,
            vec![
                Span::new(0, 7, TokenType::Docstring),
                Span::new(8, 9, TokenType::Number),
            ]
        );
    }

    #[test]
    fn test_empty_line_keeps_multiline() {
        let lang = create_test_language();
        let result = lang.highlight_block("", BlockState::inside(1));
        assert_eq!(result.end_state, BlockState::inside(1));
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_collect_spans() {
        let k = Some(TokenType::Keyword);
        let n = Some(TokenType::Number);
        let spans = collect_spans(&[k, k, None, n, k]);
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2, TokenType::Keyword),
                Span::new(3, 4, TokenType::Number),
                Span::new(4, 5, TokenType::Keyword),
            ]
        );
    }
}
