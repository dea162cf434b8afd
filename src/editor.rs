//! Editor state and main loop

use std::path::{Path, PathBuf};

use crate::buffer::Buffer;
use crate::command::{CommandFn, CommandStatus, KeyTable};
use crate::config::Config;
use crate::dialog;
use crate::display::Display;
use crate::error::{EditorError, Result};
use crate::gutter;
use crate::input::{self, special, Key, BACKSPACE};
use crate::menu::{self, MENUS};
use crate::syntax::{Color, Highlighter, LanguageDefinition};
use crate::terminal::Terminal;
use crate::window::Window;

/// Rows used by the menu bar, status bar and minibuffer
const CHROME_ROWS: usize = 3;

/// What to do when a prompt completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    OpenFile,
    SaveFile,
    /// Save, then start a new document
    SaveThenClear,
    ConfirmNew,
    ConfirmQuit,
}

impl PromptAction {
    /// Whether the prompt is a yes/no question answered by one key
    pub fn is_question(self) -> bool {
        matches!(self, Self::ConfirmNew | Self::ConfirmQuit)
    }

    /// Answer taken when Enter is pressed at a question
    pub fn default_answer(self) -> bool {
        matches!(self, Self::ConfirmNew)
    }
}

/// Minibuffer prompt state
#[derive(Debug, Clone)]
pub struct Prompt {
    pub label: String,
    pub input: String,
    pub action: PromptAction,
    /// Completions offered by the last Tab
    pub candidates: Vec<String>,
}

impl Prompt {
    /// Minibuffer text up to the cursor
    pub fn text(&self) -> String {
        if self.action.is_question() {
            let hint = if self.action.default_answer() {
                "(Y/n)"
            } else {
                "(y/N)"
            };
            format!("{} {} ", self.label, hint)
        } else {
            format!("{}: {}", self.label, self.input)
        }
    }
}

/// Main editor state
pub struct EditorState {
    /// The document
    pub buffer: Buffer,
    /// Viewport and cursor
    pub window: Window,
    /// Syntax highlighting cache for the buffer
    pub highlighter: Highlighter,
    /// Key bindings
    pub keytab: KeyTable,
    /// User settings
    pub config: Config,
    /// Whether editor is running
    pub running: bool,
    prompt: Option<Prompt>,
    /// Index of the open menu
    menu: Option<usize>,
    /// Message to show in the minibuffer
    message: Option<String>,
    bell: bool,
    redraw: bool,
    line_color: Color,
    screen_rows: usize,
    screen_cols: usize,
}

impl EditorState {
    /// Create a new editor state with an empty document
    pub fn new(config: Config, language: LanguageDefinition) -> Self {
        let buffer = Buffer::new();
        let mut highlighter = Highlighter::new(language);
        highlighter.enabled = config.syntax_highlighting;
        highlighter.rehighlight(buffer.lines());

        Self {
            buffer,
            window: Window::default(),
            highlighter,
            keytab: KeyTable::with_defaults(),
            line_color: config.current_line_color(),
            config,
            running: true,
            prompt: None,
            menu: None,
            message: None,
            bell: false,
            redraw: true,
            screen_rows: 0,
            screen_cols: 0,
        }
    }

    /// Open the file named on the command line
    ///
    /// A file that does not exist yet gives an empty buffer bound to its path.
    pub fn open_initial(&mut self, path: &Path) {
        match self.buffer.load(path) {
            Ok(()) => {
                let lines = self.buffer.line_count();
                self.set_message(format!("Opened {} ({} lines)", path.display(), lines));
            }
            Err(EditorError::FileNotFound(_)) => {
                self.buffer.set_filename(path.to_path_buf());
                self.set_message(format!("(New file) {}", path.display()));
            }
            Err(e) => self.report_error("open", e),
        }
        self.window.reset();
        self.sync();
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        let mut display = Display::new();

        while self.running {
            self.set_screen_size(terminal.rows() as usize, terminal.cols() as usize);
            if std::mem::take(&mut self.redraw) {
                display.force_redraw();
            }
            display.render(terminal, self)?;
            if std::mem::take(&mut self.bell) {
                terminal.beep()?;
            }

            match terminal.read_key()? {
                Some(event) => {
                    if let Some(key) = input::translate_key(event) {
                        self.handle_key(key)?;
                    }
                }
                None => display.force_redraw(),
            }
        }

        tracing::info!("editor exiting");
        Ok(())
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else if let Some(idx) = self.menu {
            self.handle_menu_key(idx, key)?;
        } else {
            // Clear any previous message
            self.message = None;

            if let Some(cmd) = self.keytab.lookup(key) {
                tracing::trace!(command = self.keytab.lookup_name(key), "dispatch");
                self.buffer.add_undo_boundary();
                self.execute(cmd)?;
            } else if key.is_self_insert() {
                if let Some(ch) = key.base_char() {
                    self.insert_char(ch);
                }
            } else {
                self.bell = true;
                self.set_message(format!("{} is not bound", key.display_name()));
            }
        }

        self.sync();
        Ok(())
    }

    fn execute(&mut self, cmd: CommandFn) -> Result<()> {
        match cmd(self)? {
            CommandStatus::Success => {}
            CommandStatus::Failure => self.bell = true,
            CommandStatus::Abort => {
                self.bell = true;
                self.set_message("Quit");
            }
        }
        Ok(())
    }

    /// Run a command by name, as chosen from a menu
    pub fn run_command(&mut self, name: &str) -> Result<()> {
        match self.keytab.lookup_by_name(name) {
            Some(cmd) => {
                tracing::debug!(command = name, "menu command");
                self.buffer.add_undo_boundary();
                self.execute(cmd)
            }
            None => {
                self.bell = true;
                self.set_message(format!("No command {}", name));
                Ok(())
            }
        }
    }

    /// Bring the highlighter, cursor and scroll position up to date
    fn sync(&mut self) {
        let changes = self.buffer.take_changes();
        match changes.as_slice() {
            [] => {}
            [change] => {
                self.highlighter.apply(self.buffer.lines(), *change);
            }
            _ => {
                tracing::debug!(changes = changes.len(), "several changes, full rehighlight");
                self.highlighter.rehighlight(self.buffer.lines());
            }
        }
        self.clamp_cursor();
        self.layout();
    }

    /// Keep the cursor on an existing character boundary
    fn clamp_cursor(&mut self) {
        let line_idx = self
            .window
            .cursor_line()
            .min(self.buffer.line_count().saturating_sub(1));
        let text = self.buffer.line(line_idx).map_or("", |l| l.text());
        let mut col = self.window.cursor_col().min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        if (line_idx, col) != self.cursor() {
            self.window.set_cursor(line_idx, col);
        }
    }

    fn layout(&mut self) {
        let height = self.screen_rows.saturating_sub(CHROME_ROWS);
        let width = self.screen_cols.saturating_sub(self.gutter_width());
        self.window.resize(height, width);
        let col = self.cursor_display_col();
        self.window.ensure_cursor_visible(col);
    }

    /// Tell the editor the terminal size
    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.screen_rows = rows;
        self.screen_cols = cols;
        self.sync();
    }

    /// Cursor as (line, byte offset)
    pub fn cursor(&self) -> (usize, usize) {
        (self.window.cursor_line(), self.window.cursor_col())
    }

    /// Screen column of the cursor within its line
    pub fn cursor_display_col(&self) -> usize {
        let (line_idx, col) = self.cursor();
        self.buffer
            .line(line_idx)
            .map_or(0, |l| l.display_col(col, self.tab_width()))
    }

    pub fn tab_width(&self) -> usize {
        self.config.tab_width
    }

    /// Width of the line number gutter, zero when hidden
    pub fn gutter_width(&self) -> usize {
        if self.config.line_numbers {
            gutter::width(self.buffer.line_count())
        } else {
            0
        }
    }

    /// Extension the file dialogs list
    pub fn dialog_extension(&self) -> &str {
        self.highlighter
            .language()
            .extensions
            .first()
            .map_or("py", String::as_str)
    }

    /// Background of the cursor line
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Status bar text, 1-based
    pub fn status_text(&self) -> String {
        let (line_idx, col) = self.cursor();
        let column = self
            .buffer
            .line(line_idx)
            .map_or(0, |l| l.byte_to_char(col));
        format!("Line {} | Column {}", line_idx + 1, column + 1)
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        let (line_idx, col) = self.cursor();
        self.buffer.insert_char(line_idx, col, ch);
        self.window.set_cursor(line_idx, col + ch.len_utf8());
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Current minibuffer message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.redraw = true;
    }

    fn report_error(&mut self, operation: &str, err: EditorError) {
        tracing::warn!(error = %err, "{} failed", operation);
        self.bell = true;
        self.set_message(err.to_string());
    }

    // Menus

    /// Index of the open menu
    pub fn menu(&self) -> Option<usize> {
        self.menu
    }

    pub fn open_menu(&mut self, idx: usize) {
        if idx < MENUS.len() {
            self.menu = Some(idx);
        }
    }

    /// Item listing of the open menu, with shortcuts
    pub fn menu_text(&self) -> Option<String> {
        let menu = MENUS.get(self.menu?)?;
        let shortcut = |cmd: &str| self.keytab.shortcut(cmd).map(|k| k.display_name());
        Some(menu.describe(shortcut))
    }

    fn handle_menu_key(&mut self, idx: usize, key: Key) -> Result<()> {
        self.message = None;

        if key.is_cancel() || key == Key::function(10) {
            self.menu = None;
            return Ok(());
        }
        if key == Key::special(special::LEFT) {
            self.menu = Some((idx + MENUS.len() - 1) % MENUS.len());
            return Ok(());
        }
        if key == Key::special(special::RIGHT) {
            self.menu = Some((idx + 1) % MENUS.len());
            return Ok(());
        }
        if key.is_meta() {
            if let Some(other) = key.base_char().and_then(menu::find_menu) {
                self.menu = Some(other);
                return Ok(());
            }
        }

        let item = key
            .base_char()
            .filter(|_| key.is_self_insert())
            .and_then(|ch| MENUS[idx].find_item(ch));
        match item {
            Some(item) => {
                self.menu = None;
                self.run_command(item.command)?;
            }
            None => self.bell = true,
        }
        Ok(())
    }

    // Prompts

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Start a minibuffer prompt
    pub fn start_prompt(&mut self, label: &str, action: PromptAction, initial: String) {
        self.menu = None;
        self.prompt = Some(Prompt {
            label: label.to_string(),
            input: initial,
            action,
            candidates: Vec::new(),
        });
    }

    /// Start the save dialog, prefilled with the current file name
    pub fn start_save_dialog(&mut self, action: PromptAction) {
        let initial = self
            .buffer
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let label = format!("Save file (*.{})", self.dialog_extension());
        self.start_prompt(&label, action, initial);
    }

    /// Drop the open prompt without acting on it
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.set_message("Cancelled");
    }

    fn handle_prompt_key(&mut self, key: Key) {
        if key.is_cancel() {
            self.cancel_prompt();
            return;
        }

        let extension = self.dialog_extension().to_string();
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        if prompt.action.is_question() {
            let answer = if key == Key::ctrl('m') {
                Some(prompt.action.default_answer())
            } else if key.is_self_insert() {
                key.base_char().and_then(dialog::parse_answer)
            } else {
                None
            };
            match answer {
                Some(yes) => {
                    let action = prompt.action;
                    self.prompt = None;
                    self.answer(action, yes);
                }
                None => self.bell = true,
            }
            return;
        }

        if key == Key::ctrl('m') {
            let action = prompt.action;
            let input = std::mem::take(&mut prompt.input);
            self.prompt = None;
            self.complete_prompt(action, &input);
        } else if key == BACKSPACE || key == Key::ctrl('h') {
            prompt.input.pop();
            prompt.candidates.clear();
        } else if key == Key::ctrl('i') {
            match dialog::complete(&prompt.input, &extension) {
                Ok(done) => {
                    if done.candidates.is_empty() {
                        self.bell = true;
                    }
                    prompt.input = done.input;
                    prompt.candidates = if done.candidates.len() > 1 {
                        done.candidates
                    } else {
                        Vec::new()
                    };
                }
                Err(e) => {
                    tracing::debug!(error = %e, "completion failed");
                    prompt.candidates.clear();
                    self.bell = true;
                }
            }
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                prompt.input.push(ch);
                prompt.candidates.clear();
            }
        } else {
            self.bell = true;
        }
    }

    fn answer(&mut self, action: PromptAction, yes: bool) {
        match (action, yes) {
            (PromptAction::ConfirmNew, true) => {
                self.start_save_dialog(PromptAction::SaveThenClear)
            }
            (PromptAction::ConfirmNew, false) => self.clear_document(),
            (PromptAction::ConfirmQuit, true) => self.running = false,
            _ => {}
        }
    }

    fn complete_prompt(&mut self, action: PromptAction, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            self.bell = true;
            self.set_message("No file name");
            return;
        }
        let path = PathBuf::from(input);

        match action {
            PromptAction::OpenFile => self.load_file(&path),
            PromptAction::SaveFile => {
                self.write_file(&path);
            }
            PromptAction::SaveThenClear => {
                if self.write_file(&path) {
                    self.clear_document();
                }
            }
            PromptAction::ConfirmNew | PromptAction::ConfirmQuit => {}
        }
    }

    fn load_file(&mut self, path: &Path) {
        match self.buffer.load(path) {
            Ok(()) => {
                self.window.reset();
                let lines = self.buffer.line_count();
                self.set_message(format!("Opened {} ({} lines)", path.display(), lines));
            }
            Err(e) => self.report_error("open", e),
        }
    }

    /// Write the buffer, returns whether it succeeded
    fn write_file(&mut self, path: &Path) -> bool {
        match self.buffer.write_to(path) {
            Ok(()) => {
                let lines = self.buffer.line_count();
                self.set_message(format!("Wrote {} lines to {}", lines, path.display()));
                true
            }
            Err(e) => {
                self.report_error("save", e);
                false
            }
        }
    }

    fn clear_document(&mut self) {
        self.buffer.clear();
        self.window.reset();
        self.set_message("New file");
        tracing::info!("new document");
    }
}

/// Editor over `text` on a 24x80 screen
#[cfg(test)]
pub(crate) fn test_editor(text: &str) -> EditorState {
    let language = crate::syntax::python_language().unwrap();
    let mut editor = EditorState::new(Config::default(), language);
    editor.buffer.set_content(text);
    editor.set_screen_size(24, 80);
    editor
}
