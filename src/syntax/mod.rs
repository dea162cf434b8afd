//! Syntax and styling module
//!
//! This module provides text styling infrastructure used for:
//! - Python syntax highlighting
//! - Editor chrome (gutter, status bar, cursor line)

mod highlighter;
mod language;
mod python;
pub(crate) mod rules;
mod style;
pub(crate) mod tokens;

pub use highlighter::{Highlighter, LineChange};
pub use language::LanguageDefinition;
pub use python::python_language;
pub use style::{Color, Span, Style};
