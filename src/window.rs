//! Window representation - the viewport onto the buffer

/// The visible part of the buffer and the cursor within it
#[derive(Debug, Default)]
pub struct Window {
    /// First visible line
    top_line: usize,
    /// First visible screen column (horizontal scroll)
    left_col: usize,
    /// Cursor line position (0-indexed)
    cursor_line: usize,
    /// Cursor column position (byte offset within line)
    cursor_col: usize,
    /// Number of text rows
    height: usize,
    /// Number of text columns, excluding the gutter
    width: usize,
    /// Goal display column for vertical movement
    goal_col: Option<usize>,
}

impl Window {
    /// Create a new window of the given text area size
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Default::default()
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Get the first visible column
    pub fn left_col(&self) -> usize {
        self.left_col
    }

    /// Get cursor line
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Get cursor column (byte offset)
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Set cursor position, forgetting the goal column
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.cursor_line = line;
        self.cursor_col = col;
        self.goal_col = None;
    }

    /// Move to another line, keeping the goal column
    pub fn set_cursor_keep_goal(&mut self, line: usize, col: usize) {
        self.cursor_line = line;
        self.cursor_col = col;
    }

    /// Goal column for vertical movement
    pub fn goal_col(&self) -> Option<usize> {
        self.goal_col
    }

    /// Set the goal column
    pub fn set_goal_col(&mut self, col: usize) {
        self.goal_col = Some(col);
    }

    /// Scroll so `line` is the first visible line
    pub fn set_top_line(&mut self, line: usize) {
        self.top_line = line;
    }

    /// Get window height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get window width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Resize the text area
    pub fn resize(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
    }

    /// Reset scroll and cursor (new document)
    pub fn reset(&mut self) {
        *self = Self::new(self.height, self.width);
    }

    /// Ensure cursor is visible, adjusting the scroll offsets
    ///
    /// `display_col` is the cursor's screen column within its line.
    pub fn ensure_cursor_visible(&mut self, display_col: usize) {
        let height = self.height.max(1);
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        } else if self.cursor_line >= self.top_line + height {
            self.top_line = self.cursor_line + 1 - height;
        }

        let width = self.width.max(1);
        if display_col < self.left_col {
            self.left_col = display_col;
        } else if display_col >= self.left_col + width {
            self.left_col = display_col + 1 - width;
        }
    }

    /// Get the screen row offset for a buffer line (None if not visible)
    pub fn row_of_line(&self, line: usize) -> Option<usize> {
        (line >= self.top_line && line < self.top_line + self.height)
            .then(|| line - self.top_line)
    }
}
