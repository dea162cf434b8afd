//! Line representation and text operations

use unicode_width::UnicodeWidthChar;

/// Display width of a character at a given screen column
///
/// Tabs advance to the next multiple of `tab_width`.
pub fn char_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - (col % tab_width)
    } else {
        ch.width().unwrap_or(1)
    }
}

/// A single line of text in a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Insert a character at byte position
    pub fn insert_char(&mut self, byte_pos: usize, ch: char) {
        self.text.insert(byte_pos, ch);
    }

    /// Insert a string at byte position
    pub fn insert_str(&mut self, byte_pos: usize, s: &str) {
        self.text.insert_str(byte_pos, s);
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        self.text.drain(start..end).collect()
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        Line::from(self.text.split_off(byte_pos))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
    }

    /// Byte position of the character before `byte_pos`
    pub fn prev_boundary(&self, byte_pos: usize) -> Option<usize> {
        self.text[..byte_pos.min(self.text.len())]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Byte position just after the character at `byte_pos`
    pub fn next_boundary(&self, byte_pos: usize) -> Option<usize> {
        self.text
            .get(byte_pos..)?
            .chars()
            .next()
            .map(|ch| byte_pos + ch.len_utf8())
    }

    /// Screen column of a byte position, with tabs expanded
    pub fn display_col(&self, byte_pos: usize, tab_width: usize) -> usize {
        self.text[..byte_pos.min(self.text.len())]
            .chars()
            .fold(0, |col, ch| col + char_width(ch, col, tab_width))
    }

    /// Byte position of the character covering a screen column
    ///
    /// Columns past the end of the line clamp to the line length.
    pub fn byte_at_display_col(&self, target: usize, tab_width: usize) -> usize {
        let mut col = 0;
        for (byte_idx, ch) in self.text.char_indices() {
            let width = char_width(ch, col, tab_width);
            if col + width > target {
                return byte_idx;
            }
            col += width;
        }
        self.text.len()
    }

    /// Get the character index for a given byte position
    pub fn byte_to_char(&self, byte_pos: usize) -> usize {
        self.text[..byte_pos.min(self.text.len())].chars().count()
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self { text: s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);

        line.insert_char(5, '!');
        assert_eq!(line.text(), "Hello!");
        line.insert_str(0, ">> ");
        assert_eq!(line.text(), ">> Hello!");
    }

    #[test]
    fn test_delete_range() {
        let mut line = Line::from("Hello World");
        let deleted = line.delete_range(0, 6);
        assert_eq!(deleted, "Hello ");
        assert_eq!(line.text(), "World");
    }

    #[test]
    fn test_split_off_and_append() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");
        line.append(remainder);
        assert_eq!(line.text(), "Hello World");
    }

    #[test]
    fn test_boundaries_utf8() {
        let line = Line::from("café!"); // 'é' is 2 bytes
        assert_eq!(line.next_boundary(3), Some(5));
        assert_eq!(line.prev_boundary(5), Some(3));
        assert_eq!(line.prev_boundary(0), None);
        assert_eq!(line.next_boundary(6), None);
    }

    #[test]
    fn test_display_col_expands_tabs() {
        let line = Line::from("\tx\ty");
        assert_eq!(line.display_col(0, 4), 0);
        assert_eq!(line.display_col(1, 4), 4);
        assert_eq!(line.display_col(2, 4), 5);
        assert_eq!(line.display_col(3, 4), 8);
        assert_eq!(line.display_col(3, 8), 16);
    }

    #[test]
    fn test_byte_at_display_col() {
        let line = Line::from("\tabc");
        assert_eq!(line.byte_at_display_col(0, 4), 0);
        assert_eq!(line.byte_at_display_col(2, 4), 0);
        assert_eq!(line.byte_at_display_col(4, 4), 1);
        assert_eq!(line.byte_at_display_col(6, 4), 3);
        assert_eq!(line.byte_at_display_col(40, 4), 4);
    }

    #[test]
    fn test_wide_chars() {
        let line = Line::from("你好x");
        assert_eq!(line.display_col(6, 4), 4);
        assert_eq!(line.byte_to_char(6), 2);
        assert_eq!(line.byte_at_display_col(3, 4), 3);
    }
}
