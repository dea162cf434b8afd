//! File commands - new, open, save, quit

use super::CommandStatus;
use crate::editor::{EditorState, PromptAction};
use crate::error::Result;

/// Start a new document, offering to save the current one first
pub fn new_file(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.start_prompt(
        "Do you want to save this file?",
        PromptAction::ConfirmNew,
        String::new(),
    );
    Ok(CommandStatus::Success)
}

/// Open a file through the file dialog
pub fn open_file(editor: &mut EditorState) -> Result<CommandStatus> {
    // Start in the directory of the current file
    let initial = editor
        .buffer
        .filename()
        .and_then(|p| p.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| format!("{}/", dir.display()))
        .unwrap_or_default();
    let label = format!("Open file (*.{})", editor.dialog_extension());
    editor.start_prompt(&label, PromptAction::OpenFile, initial);
    Ok(CommandStatus::Success)
}

/// Save through the file dialog, defaulting to the current file name
pub fn save_file(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.start_save_dialog(PromptAction::SaveFile);
    Ok(CommandStatus::Success)
}

/// Exit the editor, confirming if there are unsaved changes
pub fn quit(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.is_modified() {
        editor.start_prompt(
            "Modified buffer exists; quit anyway?",
            PromptAction::ConfirmQuit,
            String::new(),
        );
    } else {
        editor.running = false;
    }
    Ok(CommandStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::test_editor;
    use std::path::PathBuf;

    #[test]
    fn test_save_defaults_to_current_name() {
        let mut editor = test_editor("x");
        editor.buffer.set_filename(PathBuf::from("src/app.py"));
        save_file(&mut editor).unwrap();
        let prompt = editor.prompt().unwrap();
        assert_eq!(prompt.action, PromptAction::SaveFile);
        assert_eq!(prompt.input, "src/app.py");
    }

    #[test]
    fn test_open_starts_in_current_directory() {
        let mut editor = test_editor("x");
        open_file(&mut editor).unwrap();
        assert_eq!(editor.prompt().unwrap().input, "");

        editor.cancel_prompt();
        editor.buffer.set_filename(PathBuf::from("src/app.py"));
        open_file(&mut editor).unwrap();
        assert_eq!(editor.prompt().unwrap().input, "src/");
    }

    #[test]
    fn test_quit_unmodified_exits() {
        let mut editor = test_editor("x");
        quit(&mut editor).unwrap();
        assert!(!editor.running);
    }

    #[test]
    fn test_quit_modified_asks() {
        let mut editor = test_editor("x");
        editor.insert_char('y');
        quit(&mut editor).unwrap();
        assert!(editor.running);
        assert_eq!(editor.prompt().unwrap().action, PromptAction::ConfirmQuit);
    }
}
