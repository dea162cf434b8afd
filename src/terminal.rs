//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{
        self as term_style, Attribute, Print, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        tracing::debug!(cols, rows, "terminal initialized");
        Ok(Self { cols, rows })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Clear the entire screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Write a string in the given style, then reset attributes
    pub fn write_styled(&mut self, s: &str, style: &Style) -> Result<()> {
        self.apply_style(style)?;
        self.write_str(s)?;
        self.reset_attributes()
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read a key event (blocking)
    ///
    /// Returns None after a resize so the caller can repaint.
    pub fn read_key(&mut self) -> Result<Option<KeyEvent>> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(Some(key_event)),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    tracing::debug!(cols, rows, "terminal resized");
                    return Ok(None);
                }
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }
    }

    /// Set colors and attributes for the following output
    fn apply_style(&mut self, style: &Style) -> Result<()> {
        let mut out = io::stdout();
        queue!(
            out,
            SetForegroundColor(to_term_color(style.fg)),
            SetBackgroundColor(to_term_color(style.bg))
        )?;
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if style.reverse {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Sound the bell
    pub fn beep(&mut self) -> Result<()> {
        queue!(io::stdout(), Print('\x07'))?;
        self.flush()
    }
}

/// Map an editor color onto crossterm's
fn to_term_color(color: Color) -> term_style::Color {
    match color {
        Color::Default => term_style::Color::Reset,
        Color::Black => term_style::Color::Black,
        Color::Rgb(r, g, b) => term_style::Color::Rgb { r, g, b },
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
