//! Menu bar definitions
//!
//! Menus are static tables of named commands. Shortcuts shown next to the
//! items are looked up in the key table so the two never disagree.

/// One selectable menu entry
#[derive(Debug)]
pub struct MenuItem {
    pub label: &'static str,
    /// Letter that selects the item while the menu is open
    pub mnemonic: char,
    /// Name of the bound command
    pub command: &'static str,
}

/// A drop-down menu
#[derive(Debug)]
pub struct Menu {
    pub title: &'static str,
    pub mnemonic: char,
    pub items: &'static [MenuItem],
}

impl MenuItem {
    const fn new(label: &'static str, mnemonic: char, command: &'static str) -> Self {
        Self {
            label,
            mnemonic,
            command,
        }
    }
}

pub static MENUS: &[Menu] = &[
    Menu {
        title: "File",
        mnemonic: 'f',
        items: &[
            MenuItem::new("New File", 'n', "new-file"),
            MenuItem::new("Open", 'o', "open-file"),
            MenuItem::new("Save", 's', "save-file"),
            MenuItem::new("Quit", 'q', "quit"),
        ],
    },
    Menu {
        title: "Edit",
        mnemonic: 'e',
        items: &[MenuItem::new("Undo last action", 'u', "undo")],
    },
];

/// Find a menu by its mnemonic
pub fn find_menu(ch: char) -> Option<usize> {
    let ch = ch.to_ascii_lowercase();
    MENUS.iter().position(|m| m.mnemonic == ch)
}

/// Screen column where each menu title starts on the menu bar
pub fn title_columns() -> Vec<usize> {
    let mut col = 1;
    MENUS
        .iter()
        .map(|menu| {
            let start = col;
            col += menu.title.len() + 2;
            start
        })
        .collect()
}

impl Menu {
    /// Find an item by its mnemonic
    pub fn find_item(&self, ch: char) -> Option<&MenuItem> {
        let ch = ch.to_ascii_lowercase();
        self.items.iter().find(|item| item.mnemonic == ch)
    }

    /// One-line listing of the items, e.g. `[N]ew File (Ctrl+N)  [O]pen ...`
    pub fn describe(&self, shortcut: impl Fn(&str) -> Option<String>) -> String {
        let entries: Vec<String> = self
            .items
            .iter()
            .map(|item| {
                let label = mark_mnemonic(item.label, item.mnemonic);
                match shortcut(item.command) {
                    Some(keys) => format!("{} ({})", label, keys),
                    None => label,
                }
            })
            .collect();
        format!("{}: {}", self.title, entries.join("  "))
    }
}

/// Bracket the first occurrence of the mnemonic letter
fn mark_mnemonic(label: &str, mnemonic: char) -> String {
    match label
        .char_indices()
        .find(|(_, c)| c.to_ascii_lowercase() == mnemonic)
    {
        Some((i, c)) => format!("{}[{}]{}", &label[..i], c, &label[i + c.len_utf8()..]),
        None => label.to_string(),
    }
}
