//! Navigation commands - cursor movement

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;

/// Move to `target` line, staying as close as possible to the goal column
fn move_to_line(editor: &mut EditorState, target: usize) {
    let goal = editor
        .window
        .goal_col()
        .unwrap_or_else(|| editor.cursor_display_col());
    let tab_width = editor.tab_width();
    let col = editor
        .buffer
        .line(target)
        .map_or(0, |l| l.byte_at_display_col(goal, tab_width));
    editor.window.set_cursor_keep_goal(target, col);
    editor.window.set_goal_col(goal);
}

/// Move cursor forward one character
pub fn forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, col) = editor.cursor();
    let Some(line) = editor.buffer.line(line_idx) else {
        return Ok(CommandStatus::Failure);
    };
    if let Some(next) = line.next_boundary(col) {
        editor.window.set_cursor(line_idx, next);
    } else if line_idx + 1 < editor.buffer.line_count() {
        editor.window.set_cursor(line_idx + 1, 0);
    }
    Ok(CommandStatus::Success)
}

/// Move cursor backward one character
pub fn backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, col) = editor.cursor();
    let Some(line) = editor.buffer.line(line_idx) else {
        return Ok(CommandStatus::Failure);
    };
    if let Some(prev) = line.prev_boundary(col) {
        editor.window.set_cursor(line_idx, prev);
    } else if line_idx > 0 {
        let prev_len = editor.buffer.line(line_idx - 1).map_or(0, |l| l.len());
        editor.window.set_cursor(line_idx - 1, prev_len);
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to next line
pub fn next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, _) = editor.cursor();
    if line_idx + 1 < editor.buffer.line_count() {
        move_to_line(editor, line_idx + 1);
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to previous line
pub fn previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, _) = editor.cursor();
    if line_idx > 0 {
        move_to_line(editor, line_idx - 1);
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to beginning of line
pub fn beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, _) = editor.cursor();
    editor.window.set_cursor(line_idx, 0);
    Ok(CommandStatus::Success)
}

/// Move cursor to end of line
pub fn end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, _) = editor.cursor();
    let len = editor.buffer.line(line_idx).map_or(0, |l| l.len());
    editor.window.set_cursor(line_idx, len);
    Ok(CommandStatus::Success)
}

/// Lines moved by one page
fn page_size(editor: &EditorState) -> usize {
    editor.window.height().saturating_sub(1).max(1)
}

/// Scroll forward one page (PageDown)
pub fn scroll_down(editor: &mut EditorState) -> Result<CommandStatus> {
    let page = page_size(editor);
    let last = editor.buffer.line_count().saturating_sub(1);
    let (line_idx, _) = editor.cursor();

    let top = (editor.window.top_line() + page).min(last);
    editor.window.set_top_line(top);
    move_to_line(editor, (line_idx + page).min(last));
    Ok(CommandStatus::Success)
}

/// Scroll backward one page (PageUp)
pub fn scroll_up(editor: &mut EditorState) -> Result<CommandStatus> {
    let page = page_size(editor);
    let (line_idx, _) = editor.cursor();

    let top = editor.window.top_line().saturating_sub(page);
    editor.window.set_top_line(top);
    move_to_line(editor, line_idx.saturating_sub(page));
    Ok(CommandStatus::Success)
}

/// Move to beginning of buffer
pub fn beginning_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.window.set_cursor(0, 0);
    Ok(CommandStatus::Success)
}

/// Move to end of buffer
pub fn end_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    let last = editor.buffer.line_count().saturating_sub(1);
    let len = editor.buffer.line(last).map_or(0, |l| l.len());
    editor.window.set_cursor(last, len);
    Ok(CommandStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_editor;

    #[test]
    fn test_forward_wraps_to_next_line() {
        let mut editor = test_editor("ab\ncd");
        editor.window.set_cursor(0, 2);
        forward_char(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (1, 0));

        editor.window.set_cursor(1, 2);
        forward_char(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (1, 2));
    }

    #[test]
    fn test_backward_wraps_to_previous_line() {
        let mut editor = test_editor("ab\ncd");
        editor.window.set_cursor(1, 0);
        backward_char(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_multibyte_steps() {
        let mut editor = test_editor("héllo");
        editor.window.set_cursor(0, 1);
        forward_char(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 3));
        backward_char(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 1));
    }

    #[test]
    fn test_vertical_keeps_goal_column() {
        let mut editor = test_editor("long line here\nab\nanother long one");
        editor.window.set_cursor(0, 10);
        next_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (1, 2));
        next_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (2, 10));
        previous_line(&mut editor).unwrap();
        previous_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 10));
    }

    #[test]
    fn test_vertical_uses_display_columns() {
        let mut editor = test_editor("\tx\n12345678");
        editor.window.set_cursor(0, 1);
        next_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (1, 4));
    }

    #[test]
    fn test_line_ends() {
        let mut editor = test_editor("hello");
        editor.window.set_cursor(0, 2);
        end_of_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 5));
        beginning_of_line(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn test_buffer_ends() {
        let mut editor = test_editor("a\nb\nlast");
        end_of_buffer(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (2, 4));
        beginning_of_buffer(&mut editor).unwrap();
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn test_paging() {
        let text = (0..100)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let mut editor = test_editor(&text);
        let page = editor.window.height() - 1;

        scroll_down(&mut editor).unwrap();
        assert_eq!(editor.cursor().0, page);
        assert_eq!(editor.window.top_line(), page);

        scroll_up(&mut editor).unwrap();
        assert_eq!(editor.cursor().0, 0);
        assert_eq!(editor.window.top_line(), 0);

        end_of_buffer(&mut editor).unwrap();
        scroll_down(&mut editor).unwrap();
        assert_eq!(editor.cursor().0, 99);
    }
}
