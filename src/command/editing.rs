//! Editing commands - insert, delete, undo

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;

/// Insert newline at cursor
pub fn newline(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, col) = editor.cursor();
    editor.buffer.insert_newline(line_idx, col);
    editor.window.set_cursor(line_idx + 1, 0);
    Ok(CommandStatus::Success)
}

/// Insert a tab character
pub fn insert_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.insert_char('\t');
    Ok(CommandStatus::Success)
}

/// Delete character at cursor, joining with the next line at end of line
pub fn delete_char_forward(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, col) = editor.cursor();
    if editor.buffer.delete_forward(line_idx, col) {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failure)
    }
}

/// Delete character before cursor, joining with the previous line at start of line
pub fn delete_char_backward(editor: &mut EditorState) -> Result<CommandStatus> {
    let (line_idx, col) = editor.cursor();
    match editor.buffer.delete_backward(line_idx, col) {
        Some((line, col)) => {
            editor.window.set_cursor(line, col);
            Ok(CommandStatus::Success)
        }
        None => Ok(CommandStatus::Failure),
    }
}

/// Undo the last edit group
pub fn undo(editor: &mut EditorState) -> Result<CommandStatus> {
    match editor.buffer.undo() {
        Some((line, col)) => {
            editor.window.set_cursor(line, col);
            Ok(CommandStatus::Success)
        }
        None => {
            editor.set_message("Nothing to undo");
            Ok(CommandStatus::Failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_editor;

    #[test]
    fn test_newline_splits_line() {
        let mut editor = test_editor("hello world");
        editor.window.set_cursor(0, 5);
        newline(&mut editor).unwrap();
        assert_eq!(editor.buffer.to_text(), "hello\n world");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = test_editor("ab\ncd");
        editor.window.set_cursor(1, 0);
        assert_eq!(
            delete_char_backward(&mut editor).unwrap(),
            CommandStatus::Success
        );
        assert_eq!(editor.buffer.to_text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));

        editor.window.set_cursor(0, 0);
        assert_eq!(
            delete_char_backward(&mut editor).unwrap(),
            CommandStatus::Failure
        );
    }

    #[test]
    fn test_delete_forward_at_end_of_buffer_fails() {
        let mut editor = test_editor("ab\ncd");
        editor.window.set_cursor(0, 2);
        assert_eq!(
            delete_char_forward(&mut editor).unwrap(),
            CommandStatus::Success
        );
        assert_eq!(editor.buffer.to_text(), "abcd");
        editor.window.set_cursor(0, 4);
        assert_eq!(
            delete_char_forward(&mut editor).unwrap(),
            CommandStatus::Failure
        );
    }

    #[test]
    fn test_insert_tab() {
        let mut editor = test_editor("x");
        insert_tab(&mut editor).unwrap();
        assert_eq!(editor.buffer.to_text(), "\tx");
        assert_eq!(editor.cursor(), (0, 1));
    }

    #[test]
    fn test_undo_restores_cursor() {
        let mut editor = test_editor("ab");
        editor.window.set_cursor(0, 2);
        newline(&mut editor).unwrap();
        assert_eq!(undo(&mut editor).unwrap(), CommandStatus::Success);
        assert_eq!(editor.buffer.to_text(), "ab");
        assert_eq!(editor.cursor(), (0, 2));

        assert_eq!(undo(&mut editor).unwrap(), CommandStatus::Failure);
        assert_eq!(editor.message(), Some("Nothing to undo"));
    }
}
