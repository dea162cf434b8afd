//! Undo history
//!
//! Every buffer mutation is recorded as a primitive [`Edit`]. Edits are
//! collected into groups; undo reverts one group at a time. Consecutive
//! single-line inserts that touch end to end coalesce into one edit, so
//! typing a word undoes as a unit. [`UndoStack::boundary`] closes the open
//! group (cursor motion, save).

/// Maximum number of undo groups kept
const MAX_GROUPS: usize = 1000;

/// A single primitive edit, positions are (line, byte column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted at the position
    Insert {
        line: usize,
        col: usize,
        text: String,
    },
    /// `text` was removed starting at the position
    Delete {
        line: usize,
        col: usize,
        text: String,
    },
}

impl Edit {
    /// Whether `next` continues this edit and can be merged into it
    fn can_coalesce(&self, next: &Edit) -> bool {
        match (self, next) {
            (
                Edit::Insert { line, col, text },
                Edit::Insert {
                    line: nline,
                    col: ncol,
                    text: ntext,
                },
            ) => {
                line == nline
                    && col + text.len() == *ncol
                    && !text.contains('\n')
                    && !ntext.contains('\n')
            }
            _ => false,
        }
    }

    fn coalesce(&mut self, next: Edit) {
        if let (Edit::Insert { text, .. }, Edit::Insert { text: ntext, .. }) = (self, next) {
            text.push_str(&ntext);
        }
    }
}

/// Grouped edit history with a clean (saved) marker
#[derive(Debug, Default)]
pub struct UndoStack {
    groups: Vec<Vec<Edit>>,
    /// Whether the last group still accepts coalesced edits
    open: bool,
    /// Group count at the last save; None once that state is unreachable
    clean: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            open: false,
            clean: Some(0),
        }
    }

    /// Record an edit
    pub fn record(&mut self, edit: Edit) {
        if self.open {
            if let Some(last) = self.groups.last_mut().and_then(|g| g.last_mut()) {
                if last.can_coalesce(&edit) {
                    last.coalesce(edit);
                    return;
                }
            }
        }

        if self.clean.is_some_and(|c| c > self.groups.len()) {
            self.clean = None;
        }
        self.groups.push(vec![edit]);
        self.open = true;

        if self.groups.len() > MAX_GROUPS {
            self.groups.remove(0);
            self.clean = self.clean.and_then(|c| c.checked_sub(1));
        }
    }

    /// Close the current group
    pub fn boundary(&mut self) {
        self.open = false;
    }

    /// Pop the most recent group, edits in the order they were made
    pub fn pop(&mut self) -> Option<Vec<Edit>> {
        self.open = false;
        self.groups.pop()
    }

    /// Mark the current state as saved
    pub fn mark_clean(&mut self) {
        self.open = false;
        self.clean = Some(self.groups.len());
    }

    /// Whether the buffer matches the last saved state
    pub fn is_clean(&self) -> bool {
        self.clean == Some(self.groups.len())
    }

    /// Drop all history (new document)
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(line: usize, col: usize, text: &str) -> Edit {
        Edit::Insert {
            line,
            col,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_typing_coalesces() {
        let mut undo = UndoStack::new();
        undo.record(insert(0, 0, "d"));
        undo.record(insert(0, 1, "e"));
        undo.record(insert(0, 2, "f"));

        let group = undo.pop().unwrap();
        assert_eq!(group, vec![insert(0, 0, "def")]);
        assert!(undo.pop().is_none());
    }

    #[test]
    fn test_boundary_splits_groups() {
        let mut undo = UndoStack::new();
        undo.record(insert(0, 0, "a"));
        undo.boundary();
        undo.record(insert(0, 1, "b"));

        assert_eq!(undo.pop().unwrap(), vec![insert(0, 1, "b")]);
        assert_eq!(undo.pop().unwrap(), vec![insert(0, 0, "a")]);
    }

    #[test]
    fn test_newline_does_not_coalesce() {
        let mut undo = UndoStack::new();
        undo.record(insert(0, 0, "x"));
        undo.record(insert(0, 1, "\n"));
        undo.record(insert(1, 0, "y"));
        assert_eq!(undo.pop().unwrap(), vec![insert(1, 0, "y")]);
        assert_eq!(undo.pop().unwrap(), vec![insert(0, 1, "\n")]);
    }

    #[test]
    fn test_non_adjacent_insert_starts_group() {
        let mut undo = UndoStack::new();
        undo.record(insert(0, 0, "a"));
        undo.record(insert(0, 5, "b"));
        assert_eq!(undo.pop().unwrap().len(), 1);
        assert_eq!(undo.pop().unwrap().len(), 1);
    }

    #[test]
    fn test_clean_tracking() {
        let mut undo = UndoStack::new();
        assert!(undo.is_clean());

        undo.record(insert(0, 0, "a"));
        assert!(!undo.is_clean());

        undo.mark_clean();
        assert!(undo.is_clean());

        // Typing after save must not merge into the saved group
        undo.record(insert(0, 1, "b"));
        assert!(!undo.is_clean());
        undo.pop();
        assert!(undo.is_clean());
    }

    #[test]
    fn test_clean_unreachable_after_divergence() {
        let mut undo = UndoStack::new();
        undo.record(insert(0, 0, "a"));
        undo.mark_clean();
        undo.pop();
        undo.record(insert(0, 0, "z"));
        assert!(!undo.is_clean());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut undo = UndoStack::new();
        for i in 0..MAX_GROUPS + 10 {
            undo.record(Edit::Delete {
                line: i,
                col: 0,
                text: "x".into(),
            });
        }
        let mut count = 0;
        while undo.pop().is_some() {
            count += 1;
        }
        assert_eq!(count, MAX_GROUPS);
    }
}
