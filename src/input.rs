//! Input handling - key reading and translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const META: u32 = 0x2000_0000;
    pub const SPEC: u32 = 0x8000_0000;
}

/// Codes of special (non-character) keys
pub mod special {
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
    pub const DELETE: u32 = 0x53;
    pub const ESCAPE: u32 = 0x01;
    /// F1 is `F_BASE + 1`
    pub const F_BASE: u32 = 0x3a;
}

/// Backspace, as the DEL character
pub const BACKSPACE: Key = Key(0x7f);

/// Represents a key input with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from a character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Create a control key (Ctrl+x)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Create a meta key (Alt+x)
    pub fn meta(ch: char) -> Self {
        Key(key_flags::META | ch.to_ascii_lowercase() as u32)
    }

    /// Create a special key (arrows, function keys, etc.)
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    /// Create a function key
    pub fn function(n: u8) -> Self {
        Key::special(special::F_BASE + n as u32)
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Check if this is a control key
    pub fn is_ctrl(&self) -> bool {
        self.0 & key_flags::CONTROL != 0
    }

    /// Check if this is a meta key
    pub fn is_meta(&self) -> bool {
        self.0 & key_flags::META != 0
    }

    /// Check if this is a special key
    pub fn is_special(&self) -> bool {
        self.0 & key_flags::SPEC != 0
    }

    /// Get the base character (without modifiers)
    pub fn base_char(&self) -> Option<char> {
        if self.is_special() {
            return None;
        }
        char::from_u32(self.0 & 0x00FF_FFFF)
    }

    /// Check if this is a printable self-insert character
    pub fn is_self_insert(&self) -> bool {
        if self.0 & 0xF000_0000 != 0 {
            return false;
        }
        char::from_u32(self.0).is_some_and(|ch| ch >= ' ' && ch != '\x7f')
    }

    /// Check for the keys that cancel a prompt or menu
    pub fn is_cancel(&self) -> bool {
        *self == Key::ctrl('g') || *self == Key::special(special::ESCAPE)
    }

    /// Convert key to a human-readable string (e.g., "Ctrl+S", "Alt+F", "PageUp")
    pub fn display_name(&self) -> String {
        let mut result = String::new();

        if self.is_ctrl() {
            result.push_str("Ctrl+");
        }
        if self.is_meta() {
            result.push_str("Alt+");
        }

        if self.is_special() {
            let code = self.0 & 0xFF;
            let name = match code {
                special::HOME => "Home",
                special::UP => "Up",
                special::PAGE_UP => "PageUp",
                special::LEFT => "Left",
                special::RIGHT => "Right",
                special::END => "End",
                special::DOWN => "Down",
                special::PAGE_DOWN => "PageDown",
                special::DELETE => "Delete",
                special::ESCAPE => "Esc",
                n if (special::F_BASE + 1..=special::F_BASE + 12).contains(&n) => {
                    return format!("{}F{}", result, n - special::F_BASE);
                }
                _ => return format!("{}special-0x{:02x}", result, code),
            };
            result.push_str(name);
            return result;
        }

        let base = self.0 & 0x00FF_FFFF;
        match base {
            0x7f => result.push_str("Backspace"),
            0x20 => result.push_str("Space"),
            _ => match char::from_u32(base) {
                Some(ch) if self.is_ctrl() || self.is_meta() => {
                    result.push(ch.to_ascii_uppercase())
                }
                Some(ch) => result.push(ch),
                None => result.push_str(&format!("0x{:x}", base)),
            },
        }

        result
    }
}

/// Translate a crossterm KeyEvent to our Key representation
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    if kind != KeyEventKind::Press {
        return None;
    }

    let mut flags = 0;
    if modifiers.contains(KeyModifiers::CONTROL) {
        flags |= key_flags::CONTROL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        flags |= key_flags::META;
    }

    let key = match code {
        KeyCode::Char(ch) if flags != 0 => Key(flags | ch.to_ascii_lowercase() as u32),
        KeyCode::Char(ch) => Key::char(ch),
        KeyCode::Enter => Key::ctrl('m'),
        KeyCode::Tab => Key::ctrl('i'),
        KeyCode::Backspace => BACKSPACE,
        KeyCode::Esc => Key::special(special::ESCAPE),
        KeyCode::Delete => Key(flags | key_flags::SPEC | special::DELETE),
        KeyCode::Home => Key(flags | key_flags::SPEC | special::HOME),
        KeyCode::End => Key(flags | key_flags::SPEC | special::END),
        KeyCode::PageUp => Key(flags | key_flags::SPEC | special::PAGE_UP),
        KeyCode::PageDown => Key(flags | key_flags::SPEC | special::PAGE_DOWN),
        KeyCode::Up => Key(flags | key_flags::SPEC | special::UP),
        KeyCode::Down => Key(flags | key_flags::SPEC | special::DOWN),
        KeyCode::Left => Key(flags | key_flags::SPEC | special::LEFT),
        KeyCode::Right => Key(flags | key_flags::SPEC | special::RIGHT),
        KeyCode::F(n) => Key(flags | key_flags::SPEC | (special::F_BASE + n as u32)),
        _ => return None,
    };
    Some(key)
}
