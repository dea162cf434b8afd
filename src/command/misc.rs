//! Miscellaneous commands - display toggles, menus, abort

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;
use crate::menu;

/// Recenter the cursor line and repaint the screen (C-l)
pub fn redraw_display(editor: &mut EditorState) -> Result<CommandStatus> {
    let (cursor_line, _) = editor.cursor();
    let height = editor.window.height();
    editor.window.set_top_line(cursor_line.saturating_sub(height / 2));
    editor.force_redraw();
    Ok(CommandStatus::Success)
}

/// Toggle the line number gutter
pub fn toggle_line_numbers(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.config.line_numbers = !editor.config.line_numbers;
    editor.force_redraw();
    let status = if editor.config.line_numbers {
        "Line numbers enabled"
    } else {
        "Line numbers disabled"
    };
    editor.set_message(status);
    Ok(CommandStatus::Success)
}

/// Toggle syntax highlighting
pub fn toggle_syntax_highlighting(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.highlighter.toggle();
    editor.force_redraw();
    let status = if editor.highlighter.enabled {
        "Syntax highlighting enabled"
    } else {
        "Syntax highlighting disabled"
    };
    editor.set_message(status);
    Ok(CommandStatus::Success)
}

/// Open the first menu (F10)
pub fn menu_bar(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.open_menu(0);
    Ok(CommandStatus::Success)
}

/// Open the File menu
pub fn file_menu(editor: &mut EditorState) -> Result<CommandStatus> {
    open_by_mnemonic(editor, 'f')
}

/// Open the Edit menu
pub fn edit_menu(editor: &mut EditorState) -> Result<CommandStatus> {
    open_by_mnemonic(editor, 'e')
}

fn open_by_mnemonic(editor: &mut EditorState, ch: char) -> Result<CommandStatus> {
    match menu::find_menu(ch) {
        Some(idx) => {
            editor.open_menu(idx);
            Ok(CommandStatus::Success)
        }
        None => Ok(CommandStatus::Failure),
    }
}

/// Abort current operation (C-g)
pub fn abort(_editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(CommandStatus::Abort)
}
