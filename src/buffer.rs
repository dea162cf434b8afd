//! Buffer representation - the document being edited
//!
//! A buffer is a list of lines plus the file it is bound to. All edits go
//! through the methods here so they land in the undo history.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};
use crate::line::Line;
use crate::syntax::LineChange;
use crate::undo::{Edit, UndoStack};

/// A buffer containing text and metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text, never empty
    lines: Vec<Line>,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Edit history
    undo: UndoStack,
    /// Line ranges touched since the last `take_changes`
    changes: Vec<LineChange>,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            filename: None,
            undo: UndoStack::new(),
            changes: Vec::new(),
        }
    }

    /// Replace the contents with a file, binding the buffer to it
    pub fn load(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(EditorError::NotAFile(path.display().to_string()));
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EditorError::FileNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let content = String::from_utf8_lossy(&bytes);
        self.set_content(&content);
        self.filename = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), lines = self.lines.len(), "loaded file");
        Ok(())
    }

    /// Replace all text, resetting the undo history
    pub fn set_content(&mut self, content: &str) {
        let removed = self.lines.len();
        self.lines = content
            .split('\n')
            .map(|l| Line::from(l.strip_suffix('\r').unwrap_or(l)))
            .collect();
        self.undo.clear();
        self.changes.push(LineChange {
            first: 0,
            removed,
            added: self.lines.len(),
        });
    }

    /// Drain the line changes made since the last call
    pub fn take_changes(&mut self) -> Vec<LineChange> {
        std::mem::take(&mut self.changes)
    }

    /// Empty the buffer and forget its file
    pub fn clear(&mut self) {
        self.set_content("");
        self.filename = None;
    }

    /// Whole text joined with newlines
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Bind the buffer to a path without touching its text
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// Display name for the status bar
    pub fn name(&self) -> String {
        self.filename
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Check if buffer differs from the last load/save
    pub fn is_modified(&self) -> bool {
        !self.undo.is_clean()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Close the current undo group
    pub fn add_undo_boundary(&mut self) {
        self.undo.boundary();
    }

    /// Insert a character at position
    pub fn insert_char(&mut self, line_idx: usize, byte_pos: usize, ch: char) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            line.insert_char(byte_pos, ch);
            self.changes.push(LineChange::single(line_idx));
            self.undo.record(Edit::Insert {
                line: line_idx,
                col: byte_pos,
                text: ch.to_string(),
            });
        }
    }

    /// Insert a newline, splitting the current line
    pub fn insert_newline(&mut self, line_idx: usize, byte_pos: usize) {
        if line_idx < self.lines.len() {
            self.insert_text(line_idx, byte_pos, "\n");
            self.undo.record(Edit::Insert {
                line: line_idx,
                col: byte_pos,
                text: "\n".to_string(),
            });
        }
    }

    /// Delete the character at position, or the line break at end of line
    ///
    /// Returns true if anything was deleted.
    pub fn delete_forward(&mut self, line_idx: usize, byte_pos: usize) -> bool {
        let Some(line) = self.lines.get(line_idx) else {
            return false;
        };
        let text = match line.next_boundary(byte_pos) {
            Some(end) => line.text()[byte_pos..end].to_string(),
            None if line_idx + 1 < self.lines.len() => "\n".to_string(),
            None => return false,
        };
        self.delete_text(line_idx, byte_pos, &text);
        self.undo.record(Edit::Delete {
            line: line_idx,
            col: byte_pos,
            text,
        });
        true
    }

    /// Delete backward (backspace), returns the new cursor position
    pub fn delete_backward(&mut self, line_idx: usize, byte_pos: usize) -> Option<(usize, usize)> {
        let line = self.lines.get(line_idx)?;
        let pos = match line.prev_boundary(byte_pos) {
            Some(prev) => (line_idx, prev),
            None if line_idx > 0 => (line_idx - 1, self.lines[line_idx - 1].len()),
            None => return None,
        };
        self.delete_forward(pos.0, pos.1).then_some(pos)
    }

    /// Undo the last edit group, returns where the cursor should go
    pub fn undo(&mut self) -> Option<(usize, usize)> {
        let group = self.undo.pop()?;
        let mut cursor = None;
        for edit in group.into_iter().rev() {
            cursor = Some(match edit {
                Edit::Insert { line, col, text } => {
                    self.delete_text(line, col, &text);
                    (line, col)
                }
                Edit::Delete { line, col, text } => self.insert_text(line, col, &text),
            });
        }
        tracing::debug!(?cursor, "undo");
        cursor
    }

    /// Insert possibly multi-line text without recording it
    ///
    /// Returns the position just after the inserted text.
    fn insert_text(&mut self, line_idx: usize, byte_pos: usize, text: &str) -> (usize, usize) {
        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        let rest: Vec<&str> = pieces.collect();
        self.changes.push(LineChange {
            first: line_idx,
            removed: 1,
            added: 1 + rest.len(),
        });

        let line = &mut self.lines[line_idx];
        if rest.is_empty() {
            line.insert_str(byte_pos, first);
            return (line_idx, byte_pos + first.len());
        }

        let mut tail = line.split_off(byte_pos);
        line.insert_str(byte_pos, first);

        let last_idx = line_idx + rest.len();
        let end_col = rest[rest.len() - 1].len();
        tail.insert_str(0, rest[rest.len() - 1]);

        let new_lines = rest[..rest.len() - 1]
            .iter()
            .map(|s| Line::from(*s))
            .chain(std::iter::once(tail));
        self.lines.splice(line_idx + 1..line_idx + 1, new_lines);

        (last_idx, end_col)
    }

    /// Remove `text`, which must match the buffer at the position
    fn delete_text(&mut self, line_idx: usize, byte_pos: usize, text: &str) {
        let breaks = text.matches('\n').count();
        self.changes.push(LineChange {
            first: line_idx,
            removed: 1 + breaks,
            added: 1,
        });
        if breaks == 0 {
            self.lines[line_idx].delete_range(byte_pos, byte_pos + text.len());
            return;
        }

        let end_line = line_idx + breaks;
        let end_col = text.len() - text.rfind('\n').map_or(0, |i| i + 1);
        let mut removed: Vec<Line> = self.lines.drain(line_idx + 1..=end_line).collect();
        let mut last = removed.pop().unwrap_or_default();
        let tail = last.split_off(end_col);

        let line = &mut self.lines[line_idx];
        line.delete_range(byte_pos, line.len());
        line.append(tail);
    }

    /// Write buffer to a path and bind the buffer to it
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())?;
        self.filename = Some(path.to_path_buf());
        self.undo.mark_clean();
        tracing::info!(path = %path.display(), lines = self.lines.len(), "wrote file");
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
