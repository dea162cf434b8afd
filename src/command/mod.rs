//! Command dispatch system
//!
//! This module provides the key binding table and command implementations.
//! Commands are organized into submodules by category.

mod editing;
mod files;
mod misc;
mod navigation;

use std::collections::HashMap;

use crate::editor::EditorState;
use crate::error::Result;
use crate::input::{key_flags, special, Key, BACKSPACE};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

/// Command function signature
pub type CommandFn = fn(&mut EditorState) -> Result<CommandStatus>;

/// Key binding entry with command function and name
struct BindingEntry {
    function: CommandFn,
    name: &'static str,
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, BindingEntry>,
    /// First key bound to each command, shown in menus
    shortcuts: HashMap<&'static str, Key>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            shortcuts: HashMap::new(),
        }
    }

    /// Create key table with default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Add a key binding with command name
    pub fn bind_named(&mut self, key: Key, cmd: CommandFn, name: &'static str) {
        let entry = BindingEntry {
            function: cmd,
            name,
        };
        self.bindings.insert(key.code(), entry);
        self.shortcuts.entry(name).or_insert(key);
    }

    /// Look up a command for a key
    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|e| e.function)
    }

    /// Look up a command name for a key
    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|e| e.name)
    }

    /// Look up a command by name
    pub fn lookup_by_name(&self, name: &str) -> Option<CommandFn> {
        self.bindings
            .values()
            .find(|entry| entry.name == name)
            .map(|entry| entry.function)
    }

    /// The key shown as a command's shortcut
    pub fn shortcut(&self, name: &str) -> Option<Key> {
        self.shortcuts.get(name).copied()
    }

    /// Set up default key bindings
    fn setup_defaults(&mut self) {
        use editing::*;
        use files::*;
        use misc::*;
        use navigation::*;

        let ctrl_special = |code: u32| Key(key_flags::CONTROL | key_flags::SPEC | code);

        // File menu
        self.bind_named(Key::ctrl('n'), new_file, "new-file");
        self.bind_named(Key::ctrl('o'), open_file, "open-file");
        self.bind_named(Key::ctrl('s'), save_file, "save-file");
        self.bind_named(Key::ctrl('q'), quit, "quit");

        // Edit menu
        self.bind_named(Key::ctrl('z'), undo, "undo");

        // Menus
        self.bind_named(Key::function(10), menu_bar, "menu-bar");
        self.bind_named(Key::meta('f'), file_menu, "file-menu");
        self.bind_named(Key::meta('e'), edit_menu, "edit-menu");

        // Cursor movement
        self.bind_named(Key::special(special::RIGHT), forward_char, "forward-char");
        self.bind_named(Key::special(special::LEFT), backward_char, "backward-char");
        self.bind_named(Key::special(special::DOWN), next_line, "next-line");
        self.bind_named(Key::special(special::UP), previous_line, "previous-line");
        self.bind_named(
            Key::special(special::HOME),
            beginning_of_line,
            "beginning-of-line",
        );
        self.bind_named(Key::special(special::END), end_of_line, "end-of-line");
        self.bind_named(Key::special(special::PAGE_UP), scroll_up, "scroll-up");
        self.bind_named(Key::special(special::PAGE_DOWN), scroll_down, "scroll-down");
        self.bind_named(
            ctrl_special(special::HOME),
            beginning_of_buffer,
            "beginning-of-buffer",
        );
        self.bind_named(ctrl_special(special::END), end_of_buffer, "end-of-buffer");

        // Editing
        self.bind_named(Key::ctrl('m'), newline, "newline");
        self.bind_named(Key::ctrl('i'), insert_tab, "insert-tab");
        self.bind_named(BACKSPACE, delete_char_backward, "delete-backward-char");
        self.bind_named(Key::ctrl('h'), delete_char_backward, "delete-backward-char");
        self.bind_named(
            Key::special(special::DELETE),
            delete_char_forward,
            "delete-char",
        );

        // Display
        self.bind_named(Key::ctrl('l'), redraw_display, "redraw-display");
        self.bind_named(Key::meta('l'), toggle_line_numbers, "toggle-line-numbers");
        self.bind_named(
            Key::meta('h'),
            toggle_syntax_highlighting,
            "toggle-syntax-highlighting",
        );

        // Abort
        self.bind_named(Key::ctrl('g'), abort, "keyboard-quit");
        self.bind_named(Key::special(special::ESCAPE), abort, "keyboard-quit");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MENUS;

    #[test]
    fn test_default_bindings() {
        let table = KeyTable::with_defaults();
        assert_eq!(table.lookup_name(Key::ctrl('s')), Some("save-file"));
        assert_eq!(table.lookup_name(Key::ctrl('z')), Some("undo"));
        assert_eq!(table.lookup_name(BACKSPACE), Some("delete-backward-char"));
        assert!(table.lookup(Key::char('a')).is_none());
    }

    #[test]
    fn test_shortcut_is_first_binding() {
        let table = KeyTable::with_defaults();
        assert_eq!(table.shortcut("delete-backward-char"), Some(BACKSPACE));
        assert_eq!(table.shortcut("keyboard-quit"), Some(Key::ctrl('g')));
        assert_eq!(table.shortcut("no-such-command"), None);
    }

    #[test]
    fn test_every_menu_item_is_bound() {
        let table = KeyTable::with_defaults();
        for menu in MENUS {
            for item in menu.items {
                assert!(
                    table.lookup_by_name(item.command).is_some(),
                    "{} is not bound",
                    item.command
                );
            }
        }
    }
}
