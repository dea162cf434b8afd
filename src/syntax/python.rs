//! Python language definition

use super::language::LanguageDefinition;
use super::rules::{MultilineRule, Rule};
use super::tokens::TokenType;

/// Python keywords
#[rustfmt::skip]
const KEYWORDS: &[&str] = &[
    "and", "assert", "break", "class", "continue", "def",
    "del", "elif", "else", "except", "exec", "finally",
    "for", "from", "global", "if", "import", "in",
    "is", "lambda", "not", "or", "pass", "print",
    "raise", "return", "try", "while", "yield",
    "None", "True", "False",
];

/// Python operators
#[rustfmt::skip]
const OPERATORS: &[&str] = &[
    "=",
    // Comparison
    "==", "!=", "<", "<=", ">", ">=",
    // Arithmetic
    "+", "-", "*", "/", "//", "%", "**",
    // In-place
    "+=", "-=", "*=", "/=", "%=",
    // Bitwise
    "^", "|", "&", "~", ">>", "<<",
];

/// Python braces
const BRACES: &[&str] = &["{", "}", "(", ")", "[", "]"];

/// Pattern rules applied after the word tables: (pattern, capture, token)
///
/// The comment rule comes after the number rules, so `x  # 42` is all
/// comment. With numbers applied after comments the `42` would keep the
/// number color.
const PATTERN_RULES: &[(&str, usize, TokenType)] = &[
    (r"\bself\b", 0, TokenType::SelfRef),
    // Strings, with backslash escapes
    (r#""[^"\\]*(\\.[^"\\]*)*""#, 0, TokenType::String),
    (r"'[^'\\]*(\\.[^'\\]*)*'", 0, TokenType::String),
    // Only the name after def/class
    (r"\bdef\b\s*(\w+)", 1, TokenType::DefClass),
    (r"\bclass\b\s*(\w+)", 1, TokenType::DefClass),
    // Numbers
    (r"\b[+-]?[0-9]+[lL]?\b", 0, TokenType::Number),
    (r"\b[+-]?0[xX][0-9A-Fa-f]+[lL]?\b", 0, TokenType::Number),
    (
        r"\b[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b",
        0,
        TokenType::Number,
    ),
    (r"#[^\n]*", 0, TokenType::Comment),
];

/// Block state for lines inside `'''`
pub const IN_TRIPLE_SINGLE: u8 = 1;
/// Block state for lines inside `"""`
pub const IN_TRIPLE_DOUBLE: u8 = 2;

/// Create Python language definition
pub fn python_language() -> Result<LanguageDefinition, regex::Error> {
    let mut lang = LanguageDefinition::new("Python");
    lang.add_extension("py");

    for word in KEYWORDS {
        lang.add_rule(Rule::new(&format!(r"\b{word}\b"), 0, TokenType::Keyword)?);
    }
    for op in OPERATORS {
        lang.add_rule(Rule::new(&regex::escape(op), 0, TokenType::Operator)?);
    }
    for brace in BRACES {
        lang.add_rule(Rule::new(&regex::escape(brace), 0, TokenType::Brace)?);
    }
    for &(pattern, capture, token_type) in PATTERN_RULES {
        lang.add_rule(Rule::new(pattern, capture, token_type)?);
    }

    let single = MultilineRule::new("'''", IN_TRIPLE_SINGLE, TokenType::Docstring)?;
    let double = MultilineRule::new(r#"""""#, IN_TRIPLE_DOUBLE, TokenType::Docstring)?;
    lang.add_multiline(single);
    lang.add_multiline(double);

    tracing::debug!(rules = lang.rule_count(), "built Python rules");
    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::BlockState;
    use crate::syntax::Span;

    fn token_at(spans: &[Span], pos: usize) -> Option<TokenType> {
        spans.iter().find(|s| s.contains(pos)).map(|s| s.token_type)
    }

    fn highlight(text: &str) -> Vec<Span> {
        python_language()
            .unwrap()
            .highlight_block(text, BlockState::NORMAL)
            .spans
    }

    #[test]
    fn test_rule_table_builds() {
        let lang = python_language().unwrap();
        assert_eq!(lang.name, "Python");
        assert_eq!(
            lang.rule_count(),
            KEYWORDS.len() + OPERATORS.len() + BRACES.len() + PATTERN_RULES.len()
        );
    }

    #[test]
    fn test_self_distinct_from_keywords() {
        let spans = highlight("return self.value");
        assert_eq!(token_at(&spans, 0), Some(TokenType::Keyword));
        assert_eq!(token_at(&spans, 7), Some(TokenType::SelfRef));
        assert_eq!(token_at(&spans, 12), None);
    }

    #[test]
    fn test_self_inside_identifier_not_styled() {
        let spans = highlight("myself = 1");
        assert_eq!(token_at(&spans, 2), None);
    }

    #[test]
    fn test_def_highlights_only_name() {
        let spans = highlight("def foo(x):");
        assert_eq!(token_at(&spans, 0), Some(TokenType::Keyword));
        assert_eq!(token_at(&spans, 3), None);
        assert!(spans.contains(&Span::new(4, 7, TokenType::DefClass)));
        assert_eq!(token_at(&spans, 7), Some(TokenType::Brace));
        assert_eq!(token_at(&spans, 8), None);
    }

    #[test]
    fn test_class_name() {
        let spans = highlight("class Foo(Base):");
        assert!(spans.contains(&Span::new(6, 9, TokenType::DefClass)));
        assert_eq!(token_at(&spans, 10), None);
    }

    #[test]
    fn test_keyword_inside_string_is_string() {
        let spans = highlight(r#"x = "if \"and\" or""#);
        assert_eq!(token_at(&spans, 2), Some(TokenType::Operator));
        assert_eq!(token_at(&spans, 5), Some(TokenType::String));
        assert_eq!(token_at(&spans, 10), Some(TokenType::String));
    }

    #[test]
    fn test_single_quoted_string() {
        let spans = highlight("print('it''s')");
        assert_eq!(token_at(&spans, 0), Some(TokenType::Keyword));
        assert_eq!(token_at(&spans, 6), Some(TokenType::String));
    }

    #[test]
    fn test_numbers() {
        let spans = highlight("x = 0xFF + 3.14e-2 + 10L");
        assert_eq!(token_at(&spans, 4), Some(TokenType::Number));
        assert_eq!(token_at(&spans, 7), Some(TokenType::Number));
        assert_eq!(token_at(&spans, 11), Some(TokenType::Number));
        assert_eq!(token_at(&spans, 21), Some(TokenType::Number));
        assert_eq!(token_at(&spans, 23), Some(TokenType::Number));
    }

    #[test]
    fn test_number_in_identifier_not_styled() {
        let spans = highlight("var2 = x1");
        assert_eq!(token_at(&spans, 3), None);
        assert_eq!(token_at(&spans, 8), None);
    }

    #[test]
    fn test_comment_covers_rest_of_line() {
        let spans = highlight("x = 1  # if 2 (self)");
        assert_eq!(token_at(&spans, 4), Some(TokenType::Number));
        for pos in 7..20 {
            assert_eq!(token_at(&spans, pos), Some(TokenType::Comment));
        }
    }

    #[test]
    fn test_number_inside_comment_is_comment() {
        assert_eq!(
            highlight("x  # 42"),
            vec![Span::new(3, 7, TokenType::Comment)]
        );
    }

    #[test]
    fn test_triple_single_spans_lines() {
        let lang = python_language().unwrap();
        let lines = ["x = '''start", "def inside():", "end'''", "y = 1"];

        let mut state = BlockState::NORMAL;
        let mut ends = Vec::new();
        let mut results = Vec::new();
        for line in lines {
            let result = lang.highlight_block(line, state);
            state = result.end_state;
            ends.push(state);
            results.push(result);
        }

        assert_eq!(
            ends,
            vec![
                BlockState::inside(IN_TRIPLE_SINGLE),
                BlockState::inside(IN_TRIPLE_SINGLE),
                BlockState::NORMAL,
                BlockState::NORMAL,
            ]
        );
        assert_eq!(
            results[1].spans,
            vec![Span::new(0, 13, TokenType::Docstring)]
        );
        assert_eq!(token_at(&results[3].spans, 4), Some(TokenType::Number));
    }

    #[test]
    fn test_triple_double_state() {
        let lang = python_language().unwrap();
        let first = lang.highlight_block(r#"    """Docstring"#, BlockState::NORMAL);
        assert_eq!(first.end_state, BlockState::inside(IN_TRIPLE_DOUBLE));

        let second = lang.highlight_block(r#"    more""""#, first.end_state);
        assert_eq!(second.end_state, BlockState::NORMAL);
        assert_eq!(second.spans, vec![Span::new(0, 11, TokenType::Docstring)]);
    }

    #[test]
    fn test_single_line_docstring_stays_neutral() {
        let lang = python_language().unwrap();
        let result = lang.highlight_block(r#""""one line""""#, BlockState::NORMAL);
        assert_eq!(result.end_state, BlockState::NORMAL);
        assert_eq!(result.spans, vec![Span::new(0, 14, TokenType::Docstring)]);
    }

    #[test]
    fn test_double_quotes_inside_single_block() {
        let lang = python_language().unwrap();
        let state = BlockState::inside(IN_TRIPLE_SINGLE);
        let result = lang.highlight_block(r#"a """ b"#, state);
        assert_eq!(result.end_state, state);
    }
}
