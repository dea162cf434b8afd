//! Incremental highlighter for one document
//!
//! Caches the spans and end state of every block. After an edit only the
//! changed blocks are re-highlighted, plus any following blocks whose
//! starting state changed as a result.

use super::language::LanguageDefinition;
use super::rules::{BlockState, HighlightResult};
use super::style::Span;

/// A contiguous change to the line list
///
/// `removed` lines starting at `first` were replaced by `added` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    pub first: usize,
    pub removed: usize,
    pub added: usize,
}

impl LineChange {
    /// Text changed within one line
    pub fn single(line: usize) -> Self {
        Self {
            first: line,
            removed: 1,
            added: 1,
        }
    }
}

/// Highlighting state of a document
pub struct Highlighter {
    language: LanguageDefinition,
    /// Per-block result, None until computed
    blocks: Vec<Option<HighlightResult>>,
    /// Whether spans are handed out for drawing
    pub enabled: bool,
}

impl Highlighter {
    pub fn new(language: LanguageDefinition) -> Self {
        Self {
            language,
            blocks: Vec::new(),
            enabled: true,
        }
    }

    /// Language name
    pub fn language_name(&self) -> &str {
        &self.language.name
    }

    /// The language being highlighted
    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }

    /// Highlight every line from scratch
    pub fn rehighlight<S: AsRef<str>>(&mut self, lines: &[S]) -> usize {
        self.blocks.clear();
        self.blocks.resize(lines.len(), None);
        self.run_from(lines, 0, lines.len(), None)
    }

    /// Apply a change to the cache and re-highlight what it affects
    ///
    /// Returns the number of blocks highlighted.
    pub fn apply<S: AsRef<str>>(&mut self, lines: &[S], change: LineChange) -> usize {
        let first = change.first.min(self.blocks.len());
        let end = (change.first + change.removed).min(self.blocks.len());
        let old_end_state = end
            .checked_sub(1)
            .filter(|&i| i >= first)
            .and_then(|i| self.blocks[i].as_ref())
            .map(|b| b.end_state);

        self.blocks
            .splice(first..end, std::iter::repeat_n(None, change.added));

        if self.blocks.len() != lines.len() {
            tracing::warn!(
                cached = self.blocks.len(),
                lines = lines.len(),
                "highlight cache out of step, rebuilding"
            );
            return self.rehighlight(lines);
        }

        self.run_from(lines, first, first + change.added, old_end_state)
    }

    /// Highlight from `first` through at least `dirty_end`, then stop at
    /// the first block whose end state is what it was before.
    ///
    /// `old_end_state` is the state the replaced range used to end in.
    fn run_from<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        first: usize,
        dirty_end: usize,
        old_end_state: Option<BlockState>,
    ) -> usize {
        let mut count = 0;
        for (idx, line) in lines.iter().enumerate().skip(first) {
            let prev = self.state_before(idx);
            let result = self.language.highlight_block(line.as_ref(), prev);
            let previous = if idx + 1 == dirty_end {
                old_end_state
            } else {
                self.blocks[idx].as_ref().map(|b| b.end_state)
            };
            let unchanged = previous == Some(result.end_state);
            self.blocks[idx] = Some(result);
            count += 1;

            if unchanged && idx + 1 >= dirty_end {
                break;
            }
        }
        tracing::trace!(first, count, "highlighted blocks");
        count
    }

    fn state_before(&self, idx: usize) -> BlockState {
        idx.checked_sub(1)
            .and_then(|i| self.blocks.get(i))
            .and_then(|b| b.as_ref())
            .map_or(BlockState::NORMAL, |b| b.end_state)
    }

    /// Spans for a line, empty when disabled or unknown
    pub fn spans(&self, line: usize) -> &[Span] {
        if !self.enabled {
            return &[];
        }
        self.blocks
            .get(line)
            .and_then(|b| b.as_ref())
            .map_or(&[], |b| b.spans.as_slice())
    }

    /// State a line ends in
    #[cfg(test)]
    pub fn state(&self, line: usize) -> BlockState {
        self.blocks
            .get(line)
            .and_then(|b| b.as_ref())
            .map_or(BlockState::NORMAL, |b| b.end_state)
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}
